//! Core segmented buffer.

use std::fmt;
use std::io;

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

use crate::chunk::Chunk;
use crate::error::{BufferError, PartialError, Result};
use crate::list::ChunkList;
use crate::pool::ChunkPool;

#[cfg(feature = "hash-blake3")]
use crate::{chunk::ContentHash, hash::Blake3Hasher};

/// A FIFO byte stream stitched together from pooled fixed-capacity chunks.
///
/// Writes fill the tail chunk and pull a fresh chunk from the pool when it is
/// full. Reads drain the head chunk and hand it back to the pool as soon as it
/// is empty. The buffer has no ceiling of its own; the pool decides how far
/// it can grow.
///
/// All chunks still held are returned to the pool on drop.
///
/// # Example
///
/// ```
/// use segbuf::{MemPool, SegmentedBuffer};
///
/// let pool = MemPool::with_chunk_size(4)?;
/// let mut buf = SegmentedBuffer::new(&pool);
///
/// buf.write(&[1, 2, 3, 4, 5, 6])?;
/// assert_eq!(buf.chunk_count(), 2);
///
/// let mut out = [0u8; 3];
/// buf.read(&mut out)?;
/// assert_eq!(out, [1, 2, 3]);
/// assert_eq!(buf.peek_all()?.as_ref(), &[4, 5, 6]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SegmentedBuffer<P: ChunkPool> {
    chunks: ChunkList<P::Chunk>,
    pool: P,
}

impl<P: ChunkPool> SegmentedBuffer<P> {
    /// Creates an empty buffer drawing chunks from `pool`.
    pub fn new(pool: P) -> Self {
        Self {
            chunks: ChunkList::new(),
            pool,
        }
    }

    /// Creates a buffer that starts out holding `chunks`, head first.
    ///
    /// # Panics
    ///
    /// Panics if a chunk's capacity differs from the pool's chunk capacity.
    pub fn with_chunks(pool: P, chunks: impl IntoIterator<Item = P::Chunk>) -> Self {
        let capacity = pool.chunk_capacity();
        let chunks = chunks
            .into_iter()
            .inspect(|chunk| check_chunk_kind(chunk, capacity))
            .collect();
        Self { chunks, pool }
    }

    /// Returns the pool this buffer draws from.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Appends `src` to the end of the stream.
    ///
    /// # Errors
    ///
    /// Fails if the pool cannot supply a chunk or a chunk write fails. Bytes
    /// written before the failure stay in the buffer; their count is in
    /// [`PartialError::transferred`].
    pub fn write(&mut self, src: &[u8]) -> Result<usize, PartialError> {
        let mut n = 0;
        while n < src.len() {
            let tail = self.writable_tail().map_err(|e| e.after(n))?;
            match tail.write(&src[n..]) {
                // A chunk that is not full must take at least one byte.
                Ok(0) => {
                    return Err(BufferError::Io(io::ErrorKind::WriteZero.into()).after(n));
                }
                Ok(m) => n += m,
                Err(e) => return Err(BufferError::Io(e).after(n)),
            }
        }
        Ok(n)
    }

    /// Consumes bytes from the front of the stream into `dst`.
    ///
    /// Returns how many bytes were copied, which is less than `dst.len()`
    /// when the stream runs dry part way through. A short `Ok(n)` always
    /// means the stream is now empty.
    ///
    /// # Errors
    ///
    /// [`BufferError::EndOfStream`] if no chunks are held and `dst` is not
    /// empty. A hard chunk error aborts the read; bytes already copied
    /// into `dst` stay there.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<usize, PartialError> {
        let mut n = 0;
        while n < dst.len() {
            let Some(head) = self.chunks.head_mut() else {
                if n == 0 {
                    return Err(BufferError::EndOfStream.after(0));
                }
                break;
            };

            if head.is_empty() {
                self.release_head();
                continue;
            }

            let m = head
                .read(&mut dst[n..])
                .map_err(|e| BufferError::Io(e).after(n))?;
            n += m;

            if m == 0 || head.is_empty() {
                self.release_head();
            }
        }
        Ok(n)
    }

    /// Copies every resident byte, head to tail, without consuming anything.
    ///
    /// Copying stops at the first chunk holding no bytes.
    ///
    /// # Errors
    ///
    /// [`BufferError::EndOfStream`] if no chunks are held.
    pub fn peek_all(&self) -> Result<Bytes> {
        if self.chunks.is_empty() {
            return Err(BufferError::EndOfStream);
        }

        let mut out = BytesMut::with_capacity(self.data_len());
        for chunk in self.chunks.iter() {
            let bytes = chunk.bytes();
            if bytes.is_empty() {
                break;
            }
            out.extend_from_slice(bytes);
        }
        Ok(out.freeze())
    }

    /// Copies the resident bytes of the chunk at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfRange`] if `index >= chunk_count()`.
    pub fn peek_at(&self, index: usize) -> Result<Bytes> {
        let chunk = self.chunk(index)?;
        Ok(Bytes::copy_from_slice(chunk.bytes()))
    }

    /// Replaces the content of the chunk at `index` with `src`.
    ///
    /// Empty chunks are appended until `index` exists. The target chunk is
    /// cleared first, so this never appends to what it held before. An
    /// empty `src` is a no-op.
    ///
    /// Kept apart from [`write`](Self::write): this addresses one
    /// fixed-size block directly instead of growing on full.
    ///
    /// # Errors
    ///
    /// [`BufferError::PayloadTooLarge`] if `src` is longer than one chunk; the
    /// buffer is left untouched. Pool and chunk failures are propagated.
    pub fn write_at(&mut self, src: &[u8], index: usize) -> Result<usize, PartialError> {
        let max = self.pool.chunk_capacity();
        if src.len() > max {
            return Err(BufferError::PayloadTooLarge {
                actual: src.len(),
                max,
            }
            .after(0));
        }
        if src.is_empty() {
            return Ok(0);
        }

        while self.chunks.len() <= index {
            self.acquire().map_err(|e| e.after(0))?;
        }

        let chunk = &mut self.chunks[index];
        chunk.reset();

        let mut n = 0;
        while n < src.len() {
            match chunk.write(&src[n..]) {
                Ok(0) => {
                    return Err(BufferError::Io(io::ErrorKind::WriteZero.into()).after(n));
                }
                Ok(m) => n += m,
                Err(e) => return Err(BufferError::Io(e).after(n)),
            }
        }
        Ok(n)
    }

    /// Returns every chunk to the pool.
    pub fn reset(&mut self) {
        let released = self.chunks.len();
        while let Some(chunk) = self.chunks.pop_head() {
            self.pool.put(chunk);
        }
        if released > 0 {
            debug!(released, "segmented buffer reset");
        }
    }

    /// The buffer imposes no ceiling of its own.
    pub fn capacity(&self) -> usize {
        usize::MAX
    }

    /// Total resident bytes across all chunks.
    ///
    /// Walks every chunk; cache the result on hot paths.
    pub fn data_len(&self) -> usize {
        self.chunks.iter().map(Chunk::len).sum()
    }

    /// Returns true if no bytes are resident.
    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(Chunk::is_empty)
    }

    /// Number of chunks held.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterates over each chunk's resident bytes, head to tail.
    pub fn chunks(&self) -> impl DoubleEndedIterator<Item = &[u8]> + ExactSizeIterator {
        self.chunks.iter().map(Chunk::bytes)
    }

    /// BLAKE3 digest of all resident bytes, head to tail.
    #[cfg(feature = "hash-blake3")]
    pub fn digest(&self) -> ContentHash {
        let mut hasher = Blake3Hasher::new();
        for chunk in self.chunks.iter() {
            hasher.update(chunk.bytes());
        }
        hasher.finalize()
    }

    /// BLAKE3 digest of the chunk at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfRange`] if `index >= chunk_count()`.
    #[cfg(feature = "hash-blake3")]
    pub fn chunk_digest(&self, index: usize) -> Result<ContentHash> {
        Ok(Blake3Hasher::hash(self.chunk(index)?.bytes()))
    }

    fn chunk(&self, index: usize) -> Result<&P::Chunk> {
        self.chunks.get(index).ok_or(BufferError::IndexOutOfRange {
            index,
            len: self.chunks.len(),
        })
    }

    fn writable_tail(&mut self) -> Result<&mut P::Chunk> {
        if self.chunks.tail().is_none_or(Chunk::is_full) {
            return self.acquire();
        }
        let last = self.chunks.len() - 1;
        Ok(&mut self.chunks[last])
    }

    fn acquire(&mut self) -> Result<&mut P::Chunk> {
        let chunk = self.pool.get()?;
        check_chunk_kind(&chunk, self.pool.chunk_capacity());
        trace!(chunks = self.chunks.len() + 1, "acquired chunk");
        Ok(self.chunks.push_tail(chunk))
    }

    fn release_head(&mut self) {
        if let Some(chunk) = self.chunks.pop_head() {
            self.pool.put(chunk);
            trace!(chunks = self.chunks.len(), "released chunk");
        }
    }
}

impl<P: ChunkPool> Drop for SegmentedBuffer<P> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<P: ChunkPool> fmt::Debug for SegmentedBuffer<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentedBuffer")
            .field("chunks", &self.chunk_count())
            .field("data_len", &self.data_len())
            .field("chunk_capacity", &self.pool.chunk_capacity())
            .finish()
    }
}

/// Every chunk must come in at the pool's capacity; anything else means
/// mismatched pool and chunk implementations.
fn check_chunk_kind<C: Chunk>(chunk: &C, capacity: usize) {
    assert_eq!(
        chunk.capacity(),
        capacity,
        "chunk capacity does not match its pool"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemChunk, MemPool, PoolConfig};

    fn pool(chunk_size: usize) -> MemPool {
        MemPool::with_chunk_size(chunk_size).unwrap()
    }

    #[test]
    fn test_empty_buffer() {
        let pool = pool(4);
        let mut buf = SegmentedBuffer::new(&pool);

        assert_eq!(buf.data_len(), 0);
        assert_eq!(buf.chunk_count(), 0);
        assert_eq!(buf.capacity(), usize::MAX);
        assert!(buf.is_empty());

        assert!(buf.peek_all().unwrap_err().is_end_of_stream());
        assert!(buf.peek_at(0).unwrap_err().is_end_of_stream());

        let err = buf.read(&mut [0u8; 4]).unwrap_err();
        assert!(err.is_end_of_stream());
        assert_eq!(err.transferred, 0);

        // Nothing requested, nothing to report
        assert_eq!(buf.read(&mut []).unwrap(), 0);
    }

    #[test]
    fn test_write_fills_tail_before_growing() {
        let pool = pool(4);
        let mut buf = SegmentedBuffer::new(&pool);

        buf.write(&[1, 2]).unwrap();
        buf.write(&[3]).unwrap();
        assert_eq!(buf.chunk_count(), 1);

        buf.write(&[4, 5]).unwrap();
        assert_eq!(buf.chunk_count(), 2);
        assert_eq!(buf.peek_at(0).unwrap().as_ref(), &[1, 2, 3, 4]);
        assert_eq!(buf.peek_at(1).unwrap().as_ref(), &[5]);
    }

    #[test]
    fn test_worked_example() {
        let pool = pool(4);
        let mut buf = SegmentedBuffer::new(&pool);

        assert_eq!(buf.write(&[1, 2, 3, 4, 5, 6]).unwrap(), 6);
        assert_eq!(buf.chunk_count(), 2);

        let mut out = [0u8; 3];
        assert_eq!(buf.read(&mut out).unwrap(), 3);
        assert_eq!(out, [1, 2, 3]);
        assert_eq!(buf.chunk_count(), 2);
        assert_eq!(buf.peek_at(0).unwrap().as_ref(), &[4]);

        assert_eq!(buf.read(&mut out).unwrap(), 3);
        assert_eq!(out, [4, 5, 6]);
        assert_eq!(buf.chunk_count(), 0);
        assert_eq!(pool.stats().outstanding, 0);
    }

    #[test]
    fn test_short_read_at_end_of_stream() {
        let pool = pool(4);
        let mut buf = SegmentedBuffer::new(&pool);
        buf.write(b"abcde").unwrap();

        let mut out = [0u8; 16];
        assert_eq!(buf.read(&mut out).unwrap(), 5);
        assert_eq!(&out[..5], b"abcde");
        assert!(buf.read(&mut out).unwrap_err().is_end_of_stream());
    }

    #[test]
    fn test_write_pool_exhaustion_keeps_partial_progress() {
        let pool = MemPool::new(PoolConfig::new(4).unwrap().with_max_chunks(2)).unwrap();
        let mut buf = SegmentedBuffer::new(&pool);

        let err = buf.write(&[7u8; 10]).unwrap_err();
        assert_eq!(err.transferred, 8);
        assert!(matches!(
            err.source,
            BufferError::PoolExhausted { limit: 2 }
        ));
        assert_eq!(buf.data_len(), 8);
        assert_eq!(buf.chunk_count(), 2);
    }

    #[test]
    fn test_peek_is_non_destructive() {
        let pool = pool(3);
        let mut buf = SegmentedBuffer::new(&pool);
        buf.write(b"hello world").unwrap();

        for _ in 0..3 {
            assert_eq!(buf.peek_all().unwrap().as_ref(), b"hello world");
        }
        assert_eq!(buf.data_len(), 11);
        assert_eq!(buf.chunk_count(), 4);
        assert_eq!(
            buf.chunks().collect::<Vec<_>>(),
            vec![&b"hel"[..], b"lo ", b"wor", b"ld"]
        );
    }

    #[test]
    fn test_peek_all_stops_at_empty_chunk() {
        let pool = pool(4);
        let mut buf = SegmentedBuffer::new(&pool);
        buf.write_at(&[9, 9], 2).unwrap();

        // chunks 0 and 1 are empty
        assert!(buf.peek_all().unwrap().is_empty());
        assert_eq!(buf.data_len(), 2);
        assert_eq!(buf.peek_at(2).unwrap().as_ref(), &[9, 9]);
    }

    #[test]
    fn test_write_at_overwrites() {
        let pool = pool(4);
        let mut buf = SegmentedBuffer::new(&pool);
        buf.write(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();

        assert_eq!(buf.write_at(&[0xAA], 1).unwrap(), 1);
        assert_eq!(buf.peek_all().unwrap().as_ref(), &[1, 2, 3, 4, 0xAA]);
        assert_eq!(buf.chunk_count(), 2);
    }

    #[test]
    fn test_write_at_rejects_oversized_payload() {
        let pool = pool(4);
        let mut buf = SegmentedBuffer::new(&pool);
        buf.write(&[1, 2, 3]).unwrap();

        let err = buf.write_at(&[0u8; 5], 3).unwrap_err();
        assert_eq!(err.transferred, 0);
        assert!(matches!(
            err.source,
            BufferError::PayloadTooLarge { actual: 5, max: 4 }
        ));
        assert_eq!(buf.chunk_count(), 1);
        assert_eq!(buf.peek_all().unwrap().as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn test_write_at_empty_payload_is_noop() {
        let pool = pool(4);
        let mut buf = SegmentedBuffer::new(&pool);
        assert_eq!(buf.write_at(&[], 3).unwrap(), 0);
        assert_eq!(buf.chunk_count(), 0);
    }

    #[test]
    fn test_read_skips_empty_head_chunks() {
        let pool = pool(4);
        let mut buf = SegmentedBuffer::new(&pool);
        buf.write_at(b"xy", 3).unwrap();

        let mut out = [0u8; 4];
        assert_eq!(buf.read(&mut out).unwrap(), 2);
        assert_eq!(&out[..2], b"xy");
        assert_eq!(buf.chunk_count(), 0);
        assert_eq!(pool.stats().returned, 4);
    }

    #[test]
    fn test_reset_and_drop_return_chunks() {
        let pool = pool(2);
        {
            let mut buf = SegmentedBuffer::new(&pool);
            buf.write(b"abcdef").unwrap();
            assert_eq!(pool.stats().outstanding, 3);

            buf.reset();
            assert_eq!(buf.chunk_count(), 0);
            assert_eq!(buf.data_len(), 0);
            assert_eq!(pool.stats().outstanding, 0);

            // idempotent
            buf.reset();

            buf.write(b"gh").unwrap();
        }
        let stats = pool.stats();
        assert_eq!(stats.outstanding, 0);
        assert_eq!(stats.returned, 4);
    }

    #[test]
    fn test_with_chunks_seeds_contents() {
        let pool = pool(4);
        let mut first = MemChunk::new(4);
        first.write(b"seed").unwrap();

        let buf = SegmentedBuffer::with_chunks(&pool, [first, MemChunk::new(4)]);
        assert_eq!(buf.chunk_count(), 2);
        assert_eq!(buf.peek_all().unwrap().as_ref(), b"seed");
    }

    #[test]
    #[should_panic(expected = "chunk capacity does not match its pool")]
    fn test_with_chunks_rejects_foreign_chunk() {
        let pool = pool(4);
        let _ = SegmentedBuffer::with_chunks(&pool, [MemChunk::new(8)]);
    }

    #[test]
    #[cfg(feature = "hash-blake3")]
    fn test_digest_matches_content() {
        let pool = pool(3);
        let mut buf = SegmentedBuffer::new(&pool);
        buf.write(b"segmented").unwrap();

        assert_eq!(buf.digest(), Blake3Hasher::hash(b"segmented"));
        assert_eq!(buf.chunk_digest(1).unwrap(), Blake3Hasher::hash(b"men"));
        assert!(buf.chunk_digest(3).unwrap_err().is_end_of_stream());

        // digest does not consume
        assert_eq!(buf.data_len(), 9);
    }
}
