//! `std::io` adapters.
//!
//! End of stream reads as `Ok(0)`. A transfer that fails after moving some
//! bytes reports the partial count; the failure resurfaces on the next call.

use std::io;

use super::SegmentedBuffer;
use crate::pool::ChunkPool;

impl<P: ChunkPool> io::Read for SegmentedBuffer<P> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match SegmentedBuffer::read(self, buf) {
            Ok(n) => Ok(n),
            Err(e) if e.is_end_of_stream() => Ok(0),
            Err(e) if e.transferred > 0 => Ok(e.transferred),
            Err(e) => Err(e.into()),
        }
    }
}

impl<P: ChunkPool> io::Write for SegmentedBuffer<P> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match SegmentedBuffer::write(self, buf) {
            Ok(n) => Ok(n),
            Err(e) if e.transferred > 0 => Ok(e.transferred),
            Err(e) => Err(e.into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<P: ChunkPool> SegmentedBuffer<P> {
    /// Appends everything `reader` yields until EOF.
    ///
    /// Returns the number of bytes copied.
    pub fn fill_from<R: io::Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<u64> {
        io::copy(reader, self)
    }

    /// Moves every resident byte into `writer`, releasing chunks as they drain.
    ///
    /// Returns the number of bytes copied.
    pub fn drain_into<W: io::Write + ?Sized>(&mut self, writer: &mut W) -> io::Result<u64> {
        io::copy(self, writer)
    }
}
