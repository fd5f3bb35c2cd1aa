//! Fixed-layout record traits.
//!
//! Generated message types are `#[repr(C, packed)]` structs made of plain
//! integer, float and fixed array members. Such a struct has alignment 1 and
//! no invalid bit patterns, so a byte slice of the right length can be viewed
//! as the record in place.

use crate::error::{Error, Result};
use crate::repeated::RepeatedIter;

/// Zero-copy view over a fixed-layout wire record.
///
/// # Safety
/// Implementors must be `#[repr(C, packed)]` and contain only integer, float
/// and fixed-size array members. Every sequence of `size_of::<Self>()` bytes
/// must be a valid value, and the type must have alignment 1.
pub unsafe trait Record: Copy + 'static {
    /// Encoded length of the record in bytes.
    const ENCODED_LENGTH: usize = std::mem::size_of::<Self>();

    /// Views the start of `bytes` as this record, checking the length.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if `bytes` holds fewer than
    /// [`Self::ENCODED_LENGTH`] bytes.
    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        if bytes.len() < Self::ENCODED_LENGTH {
            return Err(Error::BufferTooShort {
                required: Self::ENCODED_LENGTH,
                available: bytes.len(),
            });
        }
        // SAFETY: length checked above; alignment and validity come from the
        // trait contract.
        Ok(unsafe { Self::from_bytes_unchecked(bytes) })
    }

    /// Views the start of `bytes` as this record without any length check.
    ///
    /// # Safety
    /// `bytes` must hold at least [`Self::ENCODED_LENGTH`] bytes.
    #[inline(always)]
    unsafe fn from_bytes_unchecked(bytes: &[u8]) -> &Self {
        // SAFETY: caller guarantees the length; the trait contract guarantees
        // alignment 1 and that any bit pattern is valid.
        unsafe { &*bytes.as_ptr().cast::<Self>() }
    }

    /// Returns the raw wire bytes of the record.
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        // SAFETY: packed records have no padding, so every byte is initialized.
        unsafe {
            std::slice::from_raw_parts((self as *const Self).cast::<u8>(), Self::ENCODED_LENGTH)
        }
    }
}

/// A record that is a complete protocol message.
pub trait Message: Record {
    /// Message class (group) identifier.
    const CLASS_ID: u8;
    /// Message identifier within the class.
    const MESSAGE_ID: u8;
    /// Display name, `GROUP-MESSAGE`.
    const NAME: &'static str;
}

/// A message followed by a variable-length array of homogeneous elements.
///
/// The element count is not stored on the wire; it is implied by the frame
/// length.
pub trait Repeating: Message {
    /// Element record of the trailing region.
    type Repeated: Record;

    /// Total frame size for a message carrying `n` elements.
    #[inline]
    #[must_use]
    fn size(n: usize) -> usize {
        Self::ENCODED_LENGTH + n * <Self::Repeated as Record>::ENCODED_LENGTH
    }

    /// Iterates the elements that follow the fixed header in `data`, stopping
    /// once `size` bytes (the frame length) have been consumed.
    #[inline]
    fn iter(data: &[u8], size: usize) -> RepeatedIter<'_, Self::Repeated> {
        RepeatedIter::new(data, Self::ENCODED_LENGTH, size)
    }
}
