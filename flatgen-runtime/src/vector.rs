//! Vector views.
//!
//! A vector is a little-endian `u32` element count followed by the element
//! slots. `T` is the stored element type and `I` the decoded item: they are
//! the same for scalars and structs, while tables and strings are stored as
//! `Offset<I>`.

use crate::endian::{UOffset, read_uoffset};
use crate::follow::{Follow, Indirect};
use std::fmt;
use std::marker::PhantomData;

/// View of a vector inside a finished buffer.
pub struct Vector<'a, T, I = T> {
    buf: &'a [u8],
    loc: usize,
    _marker: PhantomData<(T, I)>,
}

impl<'a, T, I> Vector<'a, T, I> {
    /// Creates a vector view whose length prefix is at `loc`.
    #[must_use]
    pub const fn new(buf: &'a [u8], loc: usize) -> Self {
        Self {
            buf,
            loc,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        read_uoffset(self.buf, self.loc) as usize
    }

    /// Returns true if the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn data(&self) -> usize {
        self.loc + std::mem::size_of::<UOffset>()
    }
}

impl<'a, T: Indirect<'a, I>, I> Vector<'a, T, I> {
    /// Returns the element at `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<I> {
        if index < self.len() {
            Some(T::read(self.buf, self.data() + index * T::WIDTH))
        } else {
            None
        }
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> VectorIter<'a, T, I> {
        VectorIter {
            vector: *self,
            index: 0,
            len: self.len(),
        }
    }
}

impl<'a> Vector<'a, u8> {
    /// Returns the raw bytes of a byte vector.
    #[must_use]
    pub fn bytes(&self) -> &'a [u8] {
        let start = self.data();
        &self.buf[start..start + self.len()]
    }
}

impl<T, I> Clone for Vector<'_, T, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, I> Copy for Vector<'_, T, I> {}

impl<T, I> fmt::Debug for Vector<'_, T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("loc", &self.loc)
            .field("len", &self.len())
            .finish()
    }
}

impl<'a, T, I> Follow<'a> for Vector<'a, T, I> {
    #[inline]
    fn follow(buf: &'a [u8], loc: usize) -> Self {
        Self::new(buf, loc)
    }
}

impl<'a, T: Indirect<'a, I>, I> IntoIterator for Vector<'a, T, I> {
    type Item = I;
    type IntoIter = VectorIter<'a, T, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`Vector`].
pub struct VectorIter<'a, T, I = T> {
    vector: Vector<'a, T, I>,
    index: usize,
    len: usize,
}

impl<'a, T: Indirect<'a, I>, I> Iterator for VectorIter<'a, T, I> {
    type Item = I;

    fn next(&mut self) -> Option<I> {
        if self.index >= self.len {
            return None;
        }
        let item = self.vector.get(self.index);
        self.index += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, T: Indirect<'a, I>, I> ExactSizeIterator for VectorIter<'a, T, I> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_vector() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&3u32.to_le_bytes());
        for v in [10i16, -20, 30] {
            buf.extend_from_slice(&v.to_le_bytes());
        }

        let vector: Vector<'_, i16> = Vector::new(&buf, 0);
        assert_eq!(vector.len(), 3);
        assert!(!vector.is_empty());
        assert_eq!(vector.get(1), Some(-20));
        assert_eq!(vector.get(3), None);
        assert_eq!(vector.iter().collect::<Vec<_>>(), vec![10, -20, 30]);
        assert_eq!(vector.iter().len(), 3);
    }

    #[test]
    fn test_byte_vector() {
        let buf = [2, 0, 0, 0, 0xAB, 0xCD];
        let vector: Vector<'_, u8> = Vector::new(&buf, 0);
        assert_eq!(vector.bytes(), &[0xAB, 0xCD]);
        assert_eq!(vector.into_iter().count(), 2);
    }

    #[test]
    fn test_empty_vector() {
        let buf = [0u8; 4];
        let vector: Vector<'_, u64> = Vector::new(&buf, 0);
        assert!(vector.is_empty());
        assert_eq!(vector.iter().next(), None);
    }
}
