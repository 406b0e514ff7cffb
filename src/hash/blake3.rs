//! BLAKE3-based content hashing.

use crate::chunk::ContentHash;

/// Incremental BLAKE3 hasher producing [`ContentHash`] values.
#[derive(Debug, Clone, Default)]
pub struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds more bytes.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.state.update(data);
        self
    }

    /// Returns the digest of everything fed so far.
    pub fn finalize(&self) -> ContentHash {
        ContentHash::new(self.state.finalize().into())
    }

    /// One-shot digest.
    pub fn hash(data: &[u8]) -> ContentHash {
        ContentHash::new(blake3::hash(data).into())
    }
}
