//! Async adapters.
//!
//! # Example
//!
//! ```ignore
//! use segbuf::{MemPool, SegmentedBuffer};
//! use tokio_util::compat::TokioAsyncReadCompatExt;
//!
//! async fn spool(socket: tokio::net::TcpStream, pool: &MemPool) -> std::io::Result<u64> {
//!     let mut buf = SegmentedBuffer::new(pool);
//!     buf.fill_from_async(socket.compat()).await
//! }
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures_io::{AsyncRead, AsyncWrite};
use pin_project_lite::pin_project;

use crate::pool::ChunkPool;
use crate::segmented::SegmentedBuffer;

/// Upper bound on the staging area used by [`FillFrom`].
const MAX_SCRATCH: usize = 64 * 1024;

impl<P> AsyncRead for SegmentedBuffer<P>
where
    P: ChunkPool + Unpin,
    P::Chunk: Unpin,
{
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(io::Read::read(self.get_mut(), buf))
    }
}

impl<P> AsyncWrite for SegmentedBuffer<P>
where
    P: ChunkPool + Unpin,
    P::Chunk: Unpin,
{
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(io::Write::write(self.get_mut(), buf))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

pin_project! {
    /// Future returned by [`SegmentedBuffer::fill_from_async`].
    ///
    /// Resolves to the number of bytes appended once the reader hits EOF.
    #[must_use = "futures do nothing unless polled"]
    pub struct FillFrom<'a, R, P>
    where
        P: ChunkPool,
    {
        #[pin]
        reader: R,
        buffer: &'a mut SegmentedBuffer<P>,
        scratch: Box<[u8]>,
        filled: u64,
    }
}

impl<P: ChunkPool> SegmentedBuffer<P> {
    /// Appends everything an async `reader` yields until EOF.
    ///
    /// Pool exhaustion surfaces as [`io::ErrorKind::OutOfMemory`]; bytes
    /// appended before it stay in the buffer.
    pub fn fill_from_async<R: AsyncRead>(&mut self, reader: R) -> FillFrom<'_, R, P> {
        let scratch_len = self.pool().chunk_capacity().clamp(1, MAX_SCRATCH);
        FillFrom {
            reader,
            buffer: self,
            scratch: vec![0u8; scratch_len].into_boxed_slice(),
            filled: 0,
        }
    }
}

impl<R: AsyncRead, P: ChunkPool> Future for FillFrom<'_, R, P> {
    type Output = io::Result<u64>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        loop {
            let n = ready!(this.reader.as_mut().poll_read(cx, &mut this.scratch[..]))?;
            if n == 0 {
                return Poll::Ready(Ok(*this.filled));
            }
            this.buffer
                .write(&this.scratch[..n])
                .map_err(io::Error::from)?;
            *this.filled += n as u64;
        }
    }
}

#[cfg(test)]
mod tests {
    use futures_util::io::{AsyncReadExt, AsyncWriteExt, Cursor};
    use tokio_util::compat::TokioAsyncReadCompatExt;

    use crate::{MemPool, PoolConfig, SegmentedBuffer};

    #[tokio::test]
    async fn test_async_write_then_read() {
        let pool = MemPool::with_chunk_size(4).unwrap();
        let mut buf = SegmentedBuffer::new(&pool);

        buf.write_all(b"async bytes").await.unwrap();
        buf.flush().await.unwrap();

        let mut out = Vec::new();
        buf.read_to_end(&mut out).await.unwrap();
        assert_eq!(out, b"async bytes");
        assert_eq!(buf.chunk_count(), 0);
    }

    #[tokio::test]
    async fn test_fill_from_async_reader() {
        let pool = MemPool::with_chunk_size(16).unwrap();
        let mut buf = SegmentedBuffer::new(&pool);

        let data: Vec<u8> = (0..500).map(|i| (i * 7) as u8).collect();
        let filled = buf.fill_from_async(Cursor::new(data.clone())).await.unwrap();

        assert_eq!(filled, 500);
        assert_eq!(buf.data_len(), 500);
        assert_eq!(buf.peek_all().unwrap().as_ref(), &data[..]);
    }

    #[tokio::test]
    async fn test_fill_from_tokio_reader() {
        let pool = MemPool::with_chunk_size(3).unwrap();
        let mut buf = SegmentedBuffer::new(&pool);

        let data = b"from a tokio reader";
        let filled = buf.fill_from_async((&data[..]).compat()).await.unwrap();
        assert_eq!(filled, data.len() as u64);
        assert_eq!(buf.peek_all().unwrap().as_ref(), data);
    }

    #[test]
    fn test_fill_from_async_exhaustion() {
        let pool = MemPool::new(PoolConfig::new(4).unwrap().with_max_chunks(2)).unwrap();
        let mut buf = SegmentedBuffer::new(&pool);

        let err = tokio_test::block_on(buf.fill_from_async(Cursor::new(vec![1u8; 20])))
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::OutOfMemory);
        assert_eq!(buf.data_len(), 8);
    }
}
