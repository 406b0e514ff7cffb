//! Chunk pools.
//!
//! A pool hands out empty chunks of one fixed capacity and takes them back
//! for reuse. The chunk kind is part of the pool's type
//! ([`ChunkPool::Chunk`]), so a buffer can only ever hold chunks its pool
//! produces.
//!
//! - [`ChunkPool`] - Pool contract
//! - [`MemPool`] - Thread-safe pool of [`MemChunk`](crate::MemChunk)s

mod mem;

use std::rc::Rc;
use std::sync::Arc;

use crate::chunk::Chunk;
use crate::error::Result;

pub use mem::{MemPool, PoolStats};

/// Source and sink of fixed-capacity chunks.
///
/// Pools are shared: methods take `&self`, and `ChunkPool` is implemented
/// for `&P`, `Rc<P>` and `Arc<P>` so many buffers can draw from one pool.
///
/// A chunk returned by [`get`](ChunkPool::get) is exclusively owned by the
/// caller until handed back through [`put`](ChunkPool::put).
pub trait ChunkPool {
    /// The chunk kind this pool produces.
    type Chunk: Chunk;

    /// Hands out an empty chunk of [`chunk_capacity`](ChunkPool::chunk_capacity) bytes.
    fn get(&self) -> Result<Self::Chunk>;

    /// Takes a chunk back for reuse.
    fn put(&self, chunk: Self::Chunk);

    /// Fixed capacity of every chunk this pool hands out.
    fn chunk_capacity(&self) -> usize;
}

impl<P: ChunkPool + ?Sized> ChunkPool for &P {
    type Chunk = P::Chunk;

    fn get(&self) -> Result<Self::Chunk> {
        (**self).get()
    }

    fn put(&self, chunk: Self::Chunk) {
        (**self).put(chunk)
    }

    fn chunk_capacity(&self) -> usize {
        (**self).chunk_capacity()
    }
}

impl<P: ChunkPool + ?Sized> ChunkPool for Rc<P> {
    type Chunk = P::Chunk;

    fn get(&self) -> Result<Self::Chunk> {
        (**self).get()
    }

    fn put(&self, chunk: Self::Chunk) {
        (**self).put(chunk)
    }

    fn chunk_capacity(&self) -> usize {
        (**self).chunk_capacity()
    }
}

impl<P: ChunkPool + ?Sized> ChunkPool for Arc<P> {
    type Chunk = P::Chunk;

    fn get(&self) -> Result<Self::Chunk> {
        (**self).get()
    }

    fn put(&self, chunk: Self::Chunk) {
        (**self).put(chunk)
    }

    fn chunk_capacity(&self) -> usize {
        (**self).chunk_capacity()
    }
}
