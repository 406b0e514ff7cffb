//! Chunk types.
//!
//! - [`Chunk`] - Bounded byte container contract the segmented buffer is built on
//! - [`MemChunk`] - Heap-backed fixed-capacity chunk handed out by [`MemPool`](crate::MemPool)
//! - [`ContentHash`] - 32-byte content digest

mod hash;
mod mem;

use std::io;

pub use hash::ContentHash;
pub use mem::MemChunk;

/// A bounded, mutable byte container with a fixed capacity.
///
/// A chunk behaves like a small FIFO: [`write`](Chunk::write) appends at the
/// back, [`read`](Chunk::read) consumes from the front. [`len`](Chunk::len)
/// counts unread bytes.
///
/// # Statuses
///
/// - `read` returning `Ok(0)` for a non-empty destination means the chunk is
///   drained.
/// - `write` returning `Ok(n)` with `n < src.len()` is a short write: the
///   chunk is full.
/// - `Err(_)` from either is a hard failure.
pub trait Chunk {
    /// Number of unread bytes.
    fn len(&self) -> usize;

    /// Fixed capacity in bytes.
    fn capacity(&self) -> usize;

    /// View of the unread bytes.
    fn bytes(&self) -> &[u8];

    /// Consumes up to `dst.len()` bytes from the front.
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize>;

    /// Appends as much of `src` as fits.
    fn write(&mut self, src: &[u8]) -> io::Result<usize>;

    /// Discards all content. Capacity is unchanged.
    fn reset(&mut self);

    /// Returns true if no unread bytes remain.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the chunk cannot accept another byte.
    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }
}

impl<C: Chunk + ?Sized> Chunk for Box<C> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn bytes(&self) -> &[u8] {
        (**self).bytes()
    }

    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        (**self).read(dst)
    }

    fn write(&mut self, src: &[u8]) -> io::Result<usize> {
        (**self).write(src)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
