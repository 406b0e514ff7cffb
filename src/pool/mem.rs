//! Heap chunk pool with an optional outstanding-chunk ceiling.

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::ChunkPool;
use crate::chunk::{Chunk, MemChunk};
use crate::config::PoolConfig;
use crate::error::{BufferError, Result};

/// Counters describing a pool's lifetime activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Chunks freshly allocated.
    pub allocated: u64,
    /// `get` calls served from the idle list.
    pub reused: u64,
    /// Chunks handed back through `put`.
    pub returned: u64,
    /// Chunks currently handed out.
    pub outstanding: usize,
    /// Chunks currently waiting for reuse.
    pub idle: usize,
}

#[derive(Debug, Default)]
struct PoolState {
    idle: Vec<MemChunk>,
    stats: PoolStats,
}

/// A thread-safe pool of [`MemChunk`]s.
///
/// # Example
///
/// ```
/// use segbuf::{ChunkPool, MemPool, PoolConfig};
///
/// let pool = MemPool::new(PoolConfig::new(1024)?.with_max_chunks(2))?;
///
/// let a = pool.get()?;
/// let b = pool.get()?;
/// assert!(pool.get().is_err());
///
/// pool.put(a);
/// pool.put(b);
/// assert_eq!(pool.stats().outstanding, 0);
/// # Ok::<(), segbuf::BufferError>(())
/// ```
#[derive(Debug)]
pub struct MemPool {
    config: PoolConfig,
    state: Mutex<PoolState>,
}

impl MemPool {
    /// Creates a pool from a validated configuration.
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: Mutex::new(PoolState::default()),
        })
    }

    /// Creates an unbounded pool of `chunk_size`-byte chunks.
    pub fn with_chunk_size(chunk_size: usize) -> Result<Self> {
        Self::new(PoolConfig::new(chunk_size)?)
    }

    /// Returns the pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        let state = self.state.lock();
        PoolStats {
            idle: state.idle.len(),
            ..state.stats
        }
    }

    /// Frees every idle chunk, returning how many were released.
    pub fn trim(&self) -> usize {
        let freed = std::mem::take(&mut self.state.lock().idle);
        debug!(freed = freed.len(), "trimmed idle chunks");
        freed.len()
    }
}

impl ChunkPool for MemPool {
    type Chunk = MemChunk;

    fn get(&self) -> Result<MemChunk> {
        let mut state = self.state.lock();

        if let Some(limit) = self.config.max_chunks() {
            if state.stats.outstanding >= limit {
                warn!(limit, "chunk pool exhausted");
                return Err(BufferError::PoolExhausted { limit });
            }
        }

        let chunk = match state.idle.pop() {
            Some(chunk) => {
                state.stats.reused += 1;
                chunk
            }
            None => {
                state.stats.allocated += 1;
                MemChunk::new(self.config.chunk_size())
            }
        };
        state.stats.outstanding += 1;
        Ok(chunk)
    }

    fn put(&self, mut chunk: MemChunk) {
        debug_assert_eq!(chunk.capacity(), self.config.chunk_size());
        chunk.reset();

        let mut state = self.state.lock();
        state.stats.returned += 1;
        match state.stats.outstanding.checked_sub(1) {
            Some(outstanding) => state.stats.outstanding = outstanding,
            None => warn!("chunk returned to a pool with none outstanding"),
        }
        if state.idle.len() < self.config.max_idle() {
            state.idle.push(chunk);
        }
    }

    fn chunk_capacity(&self) -> usize {
        self.config.chunk_size()
    }
}

impl Default for MemPool {
    fn default() -> Self {
        Self {
            config: PoolConfig::default(),
            state: Mutex::new(PoolState::default()),
        }
    }
}
