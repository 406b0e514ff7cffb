//! Configuration for chunk pools.
//!
//! - [`PoolConfig`] - Controls chunk capacity, the outstanding-chunk ceiling
//!   and how many released chunks are kept for reuse
//!
//! # Example
//!
//! ```
//! use segbuf::PoolConfig;
//!
//! // 4 KiB chunks, at most 1024 chunks in use at once
//! let config = PoolConfig::new(4096)?.with_max_chunks(1024);
//! config.validate()?;
//!
//! # Ok::<(), segbuf::BufferError>(())
//! ```

use crate::error::BufferError;

/// Default chunk capacity (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default number of released chunks kept for reuse.
pub const DEFAULT_MAX_IDLE: usize = 64;

/// Configuration for a [`MemPool`](crate::MemPool).
///
/// - Chunk size (`chunk_size`) - Fixed capacity of every chunk the pool hands out
/// - Chunk ceiling (`max_chunks`) - Maximum chunks outstanding at once; `None`
///   means the pool allocates on demand without limit
/// - Idle limit (`max_idle`) - Released chunks retained for reuse; chunks
///   released beyond this are freed
///
/// # Example
///
/// ```
/// use segbuf::PoolConfig;
///
/// let config = PoolConfig::default()
///     .with_chunk_size(8192)
///     .with_max_chunks(16)
///     .with_max_idle(4);
///
/// assert_eq!(config.chunk_size(), 8192);
/// assert_eq!(config.max_chunks(), Some(16));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    /// Fixed chunk capacity in bytes.
    chunk_size: usize,

    /// Ceiling on outstanding chunks.
    max_chunks: Option<usize>,

    /// Released chunks kept for reuse.
    max_idle: usize,
}

impl PoolConfig {
    /// Creates a new configuration with the given chunk capacity.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if `chunk_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use segbuf::PoolConfig;
    ///
    /// let config = PoolConfig::new(4096)?;
    /// assert_eq!(config.chunk_size(), 4096);
    /// assert!(PoolConfig::new(0).is_err());
    /// # Ok::<(), segbuf::BufferError>(())
    /// ```
    pub fn new(chunk_size: usize) -> Result<Self, BufferError> {
        let config = Self {
            chunk_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the chunk capacity.
    ///
    /// Note: This does not validate the configuration. Use [`PoolConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the outstanding-chunk ceiling.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_max_chunks(mut self, limit: usize) -> Self {
        self.max_chunks = Some(limit);
        self
    }

    /// Removes the outstanding-chunk ceiling.
    pub fn unbounded(mut self) -> Self {
        self.max_chunks = None;
        self
    }

    /// Sets how many released chunks are kept for reuse.
    pub fn with_max_idle(mut self, limit: usize) -> Self {
        self.max_idle = limit;
        self
    }

    /// Returns the chunk capacity.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the outstanding-chunk ceiling, if any.
    pub fn max_chunks(&self) -> Option<usize> {
        self.max_chunks
    }

    /// Returns the idle-chunk limit.
    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use segbuf::PoolConfig;
    ///
    /// let config = PoolConfig::default().with_max_chunks(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), BufferError> {
        if self.chunk_size == 0 {
            return Err(BufferError::InvalidConfig {
                message: "chunk_size must be non-zero",
            });
        }

        if self.max_chunks == Some(0) {
            return Err(BufferError::InvalidConfig {
                message: "max_chunks must be non-zero when set",
            });
        }

        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_chunks: None,
            max_idle: DEFAULT_MAX_IDLE,
        }
    }
}
