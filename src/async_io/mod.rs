//! Async I/O support for segmented buffers.
//!
//! This module implements the runtime-agnostic `futures-io` traits, making
//! a [`SegmentedBuffer`](crate::SegmentedBuffer) usable with tokio (through
//! `tokio_util::compat`), async-std, smol and other async runtimes.
//!
//! - `AsyncRead`/`AsyncWrite` for `SegmentedBuffer` - always ready, never suspends
//! - [`FillFrom`] - Future spooling an async reader into pooled chunks
//!
//! This module requires the `async-io` feature to be enabled.

mod fill;

pub use fill::FillFrom;
