//! Ordered chunk queue.

use std::collections::VecDeque;
use std::ops::{Index, IndexMut};

/// A FIFO of chunk handles with indexed access.
///
/// New chunks go on the tail, drained chunks come off the head.
#[derive(Debug)]
pub struct ChunkList<C> {
    chunks: VecDeque<C>,
}

impl<C> ChunkList<C> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            chunks: VecDeque::new(),
        }
    }

    /// Appends a chunk at the tail and returns it.
    pub fn push_tail(&mut self, chunk: C) -> &mut C {
        let index = self.chunks.len();
        self.chunks.push_back(chunk);
        &mut self.chunks[index]
    }

    /// Removes the head chunk.
    pub fn pop_head(&mut self) -> Option<C> {
        self.chunks.pop_front()
    }

    /// Number of chunks held.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if no chunks are held.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk at `index`, counted from the head.
    pub fn get(&self, index: usize) -> Option<&C> {
        self.chunks.get(index)
    }

    /// The tail chunk.
    pub fn tail(&self) -> Option<&C> {
        self.chunks.back()
    }

    /// Mutable head chunk.
    pub fn head_mut(&mut self) -> Option<&mut C> {
        self.chunks.front_mut()
    }

    /// Iterates head to tail.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &C> + ExactSizeIterator {
        self.chunks.iter()
    }
}

impl<C> Default for ChunkList<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Index<usize> for ChunkList<C> {
    type Output = C;

    fn index(&self, index: usize) -> &C {
        &self.chunks[index]
    }
}

impl<C> IndexMut<usize> for ChunkList<C> {
    fn index_mut(&mut self, index: usize) -> &mut C {
        &mut self.chunks[index]
    }
}

impl<C> FromIterator<C> for ChunkList<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            chunks: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut list = ChunkList::new();
        list.push_tail(1);
        list.push_tail(2);
        list.push_tail(3);

        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1), Some(&2));
        assert_eq!(list.pop_head(), Some(1));
        assert_eq!(list.get(0), Some(&2));
        assert_eq!(list.tail(), Some(&3));

        *list.push_tail(4) += 10;
        assert_eq!(list[2], 14);
    }

    #[test]
    fn test_empty() {
        let mut list: ChunkList<u8> = ChunkList::default();
        assert!(list.is_empty());
        assert_eq!(list.pop_head(), None);
        assert!(list.head_mut().is_none());
        assert!(list.get(0).is_none());
    }
}
