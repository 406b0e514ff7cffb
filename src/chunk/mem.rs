//! The MemChunk type - a heap block with read and write cursors.

use std::fmt;
use std::io;

use super::Chunk;

/// A fixed-capacity chunk backed by a single heap allocation.
///
/// Bytes live in `data[start..end]`. Draining the chunk rewinds both
/// cursors; writing into a chunk whose write cursor hit the end moves the
/// unread bytes to the front first, so a chunk is full only when it holds
/// `capacity` unread bytes.
///
/// # Example
///
/// ```
/// use segbuf::{Chunk, MemChunk};
///
/// let mut chunk = MemChunk::new(4);
/// assert_eq!(chunk.write(b"hello")?, 4);
/// assert!(chunk.is_full());
///
/// let mut out = [0u8; 2];
/// chunk.read(&mut out)?;
/// assert_eq!(&out, b"he");
/// assert_eq!(chunk.bytes(), b"ll");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct MemChunk {
    data: Box<[u8]>,
    start: usize,
    end: usize,
}

impl MemChunk {
    /// Allocates an empty chunk of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            start: 0,
            end: 0,
        }
    }

    fn compact(&mut self) {
        if self.start > 0 {
            self.data.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
    }
}

impl Chunk for MemChunk {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }

    fn bytes(&self) -> &[u8] {
        &self.data[self.start..self.end]
    }

    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        let n = dst.len().min(self.len());
        dst[..n].copy_from_slice(&self.data[self.start..self.start + n]);
        self.start += n;
        if self.start == self.end {
            self.start = 0;
            self.end = 0;
        }
        Ok(n)
    }

    fn write(&mut self, src: &[u8]) -> io::Result<usize> {
        if self.end + src.len() > self.data.len() {
            self.compact();
        }
        let n = src.len().min(self.data.len() - self.end);
        self.data[self.end..self.end + n].copy_from_slice(&src[..n]);
        self.end += n;
        Ok(n)
    }

    fn reset(&mut self) {
        self.start = 0;
        self.end = 0;
    }
}

impl fmt::Debug for MemChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemChunk")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
