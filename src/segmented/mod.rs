//! Segmented buffer.
//!
//! - [`SegmentedBuffer`] - Unbounded FIFO byte stream over pooled chunks
//!
//! The buffer also implements [`std::io::Read`] and [`std::io::Write`], and
//! with the `async-io` feature, `futures_io::AsyncRead`/`AsyncWrite`.

mod buffer;
mod io;

pub use buffer::SegmentedBuffer;
