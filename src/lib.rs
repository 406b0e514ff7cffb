//! segbuf
//!
//! Segmented byte buffers over pooled chunks.
//!
//! `segbuf` gives you one logically contiguous, unbounded byte stream that
//! is physically a queue of fixed-capacity chunks borrowed from a
//! [`ChunkPool`]. Writes grow the queue a chunk at a time, reads shrink it
//! and hand drained chunks straight back to the pool, so a steady-state
//! stream allocates nothing.
//!
//! The crate intentionally:
//! - does NOT allocate one large contiguous block
//! - does NOT lock (a buffer is single-owner; only pools are shared)
//! - does NOT persist or serialize buffer state
//! - does NOT do file or network I/O itself
//!
//! # Sync
//!
//! ```
//! use std::io::{Read, Write};
//! use segbuf::{MemPool, PoolConfig, SegmentedBuffer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = MemPool::new(PoolConfig::new(4096)?.with_max_chunks(256))?;
//!     let mut buf = SegmentedBuffer::new(&pool);
//!
//!     buf.write_all(b"hello segmented world")?;
//!
//!     let mut out = String::new();
//!     buf.read_to_string(&mut out)?;
//!     assert_eq!(out, "hello segmented world");
//!     Ok(())
//! }
//! ```
//!
//! # Indexed blocks
//!
//! ```
//! use segbuf::{MemPool, SegmentedBuffer};
//!
//! let pool = MemPool::with_chunk_size(512)?;
//! let mut buf = SegmentedBuffer::new(&pool);
//!
//! // Materialize record #5 directly; records 0..5 exist but are empty.
//! buf.write_at(b"record five", 5)?;
//! assert_eq!(buf.chunk_count(), 6);
//! assert_eq!(buf.peek_at(5)?.as_ref(), b"record five");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::io::AsyncReadExt;
//! use segbuf::{MemPool, SegmentedBuffer};
//!
//! async fn demo<R: futures_io::AsyncRead>(reader: R, pool: &MemPool) -> std::io::Result<()> {
//!     let mut buf = SegmentedBuffer::new(pool);
//!     buf.fill_from_async(reader).await?;
//!
//!     let mut out = Vec::new();
//!     buf.read_to_end(&mut out).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod config;
mod error;
mod list;
mod pool;
mod segmented;

mod hash; // internal blake3 impl

#[cfg(feature = "async-io")]
mod async_io;

//
// Public surface
//

pub use chunk::{Chunk, ContentHash, MemChunk};
pub use config::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_IDLE, PoolConfig};
pub use error::{BufferError, PartialError, Result};
pub use list::ChunkList;
pub use pool::{ChunkPool, MemPool, PoolStats};
pub use segmented::SegmentedBuffer;

#[cfg(feature = "async-io")]
pub use async_io::FillFrom;
