//! Error types for segbuf.

use std::io;

use thiserror::Error;

/// Result type for buffer and pool operations.
pub type Result<T, E = BufferError> = std::result::Result<T, E>;

/// Errors that can occur during buffer and pool operations.
#[derive(Debug, Error)]
pub enum BufferError {
    /// A read or peek found no buffered chunks.
    #[error("end of stream")]
    EndOfStream,

    /// A chunk index past the end of the chunk list.
    ///
    /// Reported as end of stream by [`BufferError::is_end_of_stream`].
    #[error("chunk index {index} out of range ({len} chunks)")]
    IndexOutOfRange {
        /// The requested chunk index.
        index: usize,
        /// The number of chunks held at the time.
        len: usize,
    },

    /// The chunk pool refused to hand out another chunk.
    #[error("chunk pool exhausted: {limit} chunks outstanding")]
    PoolExhausted {
        /// The pool's chunk ceiling.
        limit: usize,
    },

    /// An indexed write payload does not fit in a single chunk.
    #[error("payload too large: {actual} bytes (chunk capacity {max})")]
    PayloadTooLarge {
        /// The payload size that was attempted.
        actual: usize,
        /// The fixed chunk capacity.
        max: usize,
    },

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A chunk failed with a hard I/O error.
    #[error("chunk io error: {0}")]
    Io(#[from] io::Error),
}

impl BufferError {
    /// Returns true if this error means "no more data".
    pub fn is_end_of_stream(&self) -> bool {
        matches!(
            self,
            BufferError::EndOfStream | BufferError::IndexOutOfRange { .. }
        )
    }

    /// Attaches the number of bytes moved before the failure.
    pub(crate) fn after(self, transferred: usize) -> PartialError {
        PartialError {
            transferred,
            source: self,
        }
    }
}

impl From<BufferError> for io::Error {
    fn from(e: BufferError) -> Self {
        match e {
            BufferError::Io(e) => e,
            BufferError::EndOfStream | BufferError::IndexOutOfRange { .. } => {
                io::Error::new(io::ErrorKind::UnexpectedEof, e)
            }
            BufferError::PoolExhausted { .. } => io::Error::new(io::ErrorKind::OutOfMemory, e),
            BufferError::PayloadTooLarge { .. } | BufferError::InvalidConfig { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, e)
            }
        }
    }
}

/// A transfer that failed part way through.
///
/// Progress made before the failure is never rolled back: bytes already
/// copied out stay copied, and chunks already appended stay appended.
#[derive(Debug, Error)]
#[error("{source} (after {transferred} bytes)")]
pub struct PartialError {
    /// Bytes moved before the failure.
    pub transferred: usize,
    /// The underlying failure.
    #[source]
    pub source: BufferError,
}

impl PartialError {
    /// Returns true if the transfer stopped because no data was left.
    pub fn is_end_of_stream(&self) -> bool {
        self.source.is_end_of_stream()
    }
}

impl From<PartialError> for io::Error {
    fn from(e: PartialError) -> Self {
        e.source.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: BufferError = io_err.into();
        assert!(matches!(err, BufferError::Io(_)));
    }

    #[test]
    fn test_display() {
        let err = BufferError::PayloadTooLarge { actual: 100, max: 50 };
        assert!(err.to_string().contains("payload too large"));

        let err = BufferError::PoolExhausted { limit: 8 }.after(12);
        assert_eq!(
            err.to_string(),
            "chunk pool exhausted: 8 chunks outstanding (after 12 bytes)"
        );
    }

    #[test]
    fn test_end_of_stream_classification() {
        assert!(BufferError::EndOfStream.is_end_of_stream());
        assert!(BufferError::IndexOutOfRange { index: 3, len: 1 }.is_end_of_stream());
        assert!(!BufferError::PoolExhausted { limit: 1 }.is_end_of_stream());
    }

    #[test]
    fn test_into_io_error_kind() {
        let e: io::Error = BufferError::EndOfStream.into();
        assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);

        let e: io::Error = BufferError::PoolExhausted { limit: 1 }.after(3).into();
        assert_eq!(e.kind(), io::ErrorKind::OutOfMemory);

        let e: io::Error = BufferError::Io(io::Error::other("boom")).into();
        assert_eq!(e.kind(), io::ErrorKind::Other);
    }
}
