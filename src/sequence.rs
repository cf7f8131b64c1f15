//! Sequence: contiguous growable storage with index-based mutation.

use crate::error::{Error, Result};
use core::fmt;

/// Capacity used by `Sequence::default()`.
pub const DEFAULT_SEQUENCE_CAPACITY: usize = 10;

/// Growable ordered sequence.
///
/// `capacity` is tracked here rather than read back from the buffer so that
/// growth is exactly "double when full", whatever the allocator hands back.
#[derive(Clone, Debug)]
pub struct Sequence<T> {
    buf: Vec<T>,
    capacity: usize,
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_SEQUENCE_CAPACITY),
            capacity: DEFAULT_SEQUENCE_CAPACITY,
        }
    }
}

impl<T> Sequence<T> {
    /// Create an empty sequence. Fails with `InvalidArgument` for capacity 0.
    pub fn new(initial_capacity: usize) -> Result<Self> {
        if initial_capacity == 0 {
            return Err(Error::InvalidArgument("initial_capacity"));
        }
        Ok(Self {
            buf: Vec::with_capacity(initial_capacity),
            capacity: initial_capacity,
        })
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn grow_if_full(&mut self) {
        if self.buf.len() < self.capacity {
            return;
        }
        let doubled = self.capacity * 2;
        self.buf.reserve_exact(doubled - self.buf.len());
        log::debug!("sequence grow: capacity {} -> {}", self.capacity, doubled);
        self.capacity = doubled;
    }

    /// Push to the end, doubling capacity first when full.
    pub fn append(&mut self, value: T) {
        self.grow_if_full();
        self.buf.push(value);
    }

    /// Insert at `index` in `0..=len`, shifting `[index, len)` one slot right.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.buf.len();
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.grow_if_full();
        self.buf.push(value);
        self.buf[index..].rotate_right(1);
        Ok(())
    }

    /// Remove and return the element at `index`, shifting the tail left.
    /// Capacity is never reduced.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let len = self.buf.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.buf[index..].rotate_left(1);
        self.buf.pop().ok_or(Error::IndexOutOfRange { index, len })
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.buf.len();
        self.buf.get(index).ok_or(Error::IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.buf.len();
        self.buf
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Overwrite the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(core::mem::replace(slot, value))
    }

    /// Drop all elements; capacity is kept.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl<T: fmt::Display> fmt::Display for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.buf.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: construction rejects a zero capacity.
    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(
            Sequence::<i32>::new(0).unwrap_err(),
            Error::InvalidArgument("initial_capacity")
        );
    }

    /// Invariant: capacity doubles exactly when an append hits a full buffer.
    #[test]
    fn append_doubles_when_full() {
        let mut s = Sequence::new(2).unwrap();
        s.append(1);
        s.append(2);
        assert_eq!(s.capacity(), 2);
        s.append(3);
        assert_eq!(s.capacity(), 4);
        s.append(4);
        s.append(5);
        assert_eq!(s.capacity(), 8);
        assert_eq!(s.len(), 5);
        for i in 0..5 {
            assert_eq!(*s.get(i).unwrap(), i as i32 + 1);
        }
    }

    /// Invariant: `insert_at` shifts right and accepts `index == len`.
    #[test]
    fn insert_at_shifts_right() {
        let mut s = Sequence::new(1).unwrap();
        s.insert_at(0, 'c').unwrap();
        s.insert_at(0, 'a').unwrap();
        s.insert_at(1, 'b').unwrap();
        s.insert_at(3, 'd').unwrap();
        assert_eq!(s.to_string(), "[a, b, c, d]");
        assert_eq!(s.capacity(), 4);
        assert_eq!(
            s.insert_at(5, 'x'),
            Err(Error::IndexOutOfRange { index: 5, len: 4 })
        );
        assert_eq!(s.len(), 4);
    }

    /// Invariant: `remove_at` returns the element, shifts left and never shrinks.
    #[test]
    fn remove_at_shifts_left_without_shrinking() {
        let mut s = Sequence::new(4).unwrap();
        for v in ["a", "b", "c", "d", "e"] {
            s.append(v);
        }
        assert_eq!(s.capacity(), 8);
        assert_eq!(s.remove_at(1), Ok("b"));
        assert_eq!(s.remove_at(3), Ok("e"));
        assert_eq!(s.to_string(), "[a, c, d]");
        assert_eq!(s.capacity(), 8);
        assert_eq!(
            s.remove_at(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn set_returns_previous_and_checks_bounds() {
        let mut s = Sequence::new(3).unwrap();
        s.append(10);
        assert_eq!(s.set(0, 11), Ok(10));
        assert_eq!(s.get(0), Ok(&11));
        assert_eq!(s.set(1, 12), Err(Error::IndexOutOfRange { index: 1, len: 1 }));
        *s.get_mut(0).unwrap() += 1;
        assert_eq!(s.get(0), Ok(&12));
    }

    /// Invariant: `clear` resets the length and keeps the capacity.
    #[test]
    fn clear_retains_capacity() {
        let mut s = Sequence::new(1).unwrap();
        s.append(1u8);
        s.append(2u8);
        let cap = s.capacity();
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.capacity(), cap);
        assert!(s.get(0).is_err());
        s.append(3u8);
        assert_eq!(s.get(0), Ok(&3));
    }

    #[test]
    fn default_uses_ten_slots() {
        let s: Sequence<String> = Sequence::default();
        assert_eq!(s.capacity(), DEFAULT_SEQUENCE_CAPACITY);
        assert!(s.is_empty());
        assert_eq!(s.to_string(), "[]");
    }
}
