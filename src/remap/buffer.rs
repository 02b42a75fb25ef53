//! Bounded window of the most recently observed keys

use std::collections::VecDeque;

use super::types::Key;

/// Sliding window over recent keys
///
/// Holds at most `capacity` keys; appending past capacity drops the oldest.
#[derive(Debug, Clone)]
pub struct KeyBuffer {
    keys: VecDeque<Key>,
    capacity: usize,
}

impl KeyBuffer {
    /// Create an empty buffer. A capacity of 0 is raised to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            keys: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, key: Key) {
        self.keys.push_back(key);
        while self.keys.len() > self.capacity {
            self.keys.pop_front();
        }
    }

    pub fn reset(&mut self) {
        self.keys.clear();
    }

    /// The buffered keys, oldest first
    pub fn keys(&mut self) -> &[Key] {
        self.keys.make_contiguous()
    }

    /// Buffered keys without requiring mutable access
    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remap::types::keys;

    #[test]
    fn test_append_keeps_tail() {
        let mut buffer = KeyBuffer::with_capacity(2);
        for key in keys(["a", "b", "c"]) {
            buffer.append(key);
        }

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.keys(), keys(["b", "c"]).as_slice());
    }

    #[test]
    fn test_zero_capacity_raised_to_one() {
        let mut buffer = KeyBuffer::with_capacity(0);
        buffer.append(Key::from("a"));
        buffer.append(Key::from("b"));

        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.keys(), keys(["b"]).as_slice());
    }

    #[test]
    fn test_reset() {
        let mut buffer = KeyBuffer::with_capacity(3);
        buffer.append(Key::from("a"));
        buffer.reset();
        assert!(buffer.is_empty());
    }
}
