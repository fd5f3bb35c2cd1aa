//! Iterator over the trailing repeated region of a frame.

use crate::record::Record;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Lazy, forward-only iterator over repeated elements.
///
/// The region starts right after the fixed header and ends where the declared
/// frame length ends. Elements are yielded as in-place views; a trailing
/// partial element is not yielded. The iterator is never rewound: call the
/// message's `iter` again to start over.
///
/// The element count of the message is never consulted. The declared length
/// is clamped to the slice actually supplied, so a short buffer yields fewer
/// elements rather than reading out of bounds.
#[derive(Debug, Clone, Copy)]
pub struct RepeatedIter<'a, T> {
    region: &'a [u8],
    offset: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: Record> RepeatedIter<'a, T> {
    /// Creates an iterator over `data[header_len..size]`.
    ///
    /// # Arguments
    /// * `data` - Frame payload, starting with the fixed header
    /// * `header_len` - Size of the fixed header in bytes
    /// * `size` - Declared frame length in bytes
    #[must_use]
    pub fn new(data: &'a [u8], header_len: usize, size: usize) -> Self {
        let end = size.min(data.len());
        let region: &'a [u8] = if header_len < end {
            &data[header_len..end]
        } else {
            &[]
        };
        Self {
            region,
            offset: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements not yet yielded.
    #[must_use]
    pub fn remaining(&self) -> usize {
        match T::ENCODED_LENGTH {
            0 => 0,
            len => (self.region.len() - self.offset) / len,
        }
    }
}

impl<'a, T: Record> Iterator for RepeatedIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }
        // SAFETY: remaining() > 0 guarantees a full element after `offset`.
        let item = unsafe { T::from_bytes_unchecked(&self.region[self.offset..]) };
        self.offset += T::ENCODED_LENGTH;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T: Record> ExactSizeIterator for RepeatedIter<'_, T> {}

impl<T: Record> FusedIterator for RepeatedIter<'_, T> {}
