//! Views over locations in a finished buffer.
//!
//! This module provides:
//! - [`Follow`] for types that wrap a byte position (tables, strings, vectors)
//! - [`Indirect`] for decoding vector elements stored inline or by offset
//! - [`Offset`] typed forward references produced by the builder
//! - [`Struct`] for packed fixed-layout structs viewed in place

use crate::endian::{Endian, UOffset, read_uoffset};
use crate::error::{Error, Result};
use std::fmt;
use std::marker::PhantomData;

/// A view constructed from a buffer and the byte position of its data.
pub trait Follow<'a>: Sized {
    /// Builds the view located at `loc`.
    fn follow(buf: &'a [u8], loc: usize) -> Self;
}

/// Union placeholder: union payloads are not decoded.
impl<'a> Follow<'a> for () {
    #[inline]
    fn follow(_buf: &'a [u8], _loc: usize) -> Self {}
}

/// Element stored in a vector, decoded into `I`.
///
/// Scalars and fixed structs are stored inline; tables and strings are
/// stored as an [`Offset`] to the element.
pub trait Indirect<'a, I> {
    /// Width of one element slot in bytes.
    const WIDTH: usize;

    /// Decodes the element whose slot starts at `loc`.
    fn read(buf: &'a [u8], loc: usize) -> I;
}

macro_rules! impl_indirect_scalar {
    ($($t:ty),*) => {
        $(
            impl<'a> Indirect<'a, $t> for $t {
                const WIDTH: usize = <$t as Endian>::SIZE;

                #[inline(always)]
                fn read(buf: &'a [u8], loc: usize) -> $t {
                    <$t as Endian>::read_le(buf, loc)
                }
            }
        )*
    };
}

impl_indirect_scalar!(bool, u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl<'a, T: Struct> Indirect<'a, &'a T> for &'a T {
    const WIDTH: usize = std::mem::size_of::<T>();

    #[inline(always)]
    fn read(buf: &'a [u8], loc: usize) -> &'a T {
        struct_at(buf, loc)
    }
}

impl<'a, T: Follow<'a>> Indirect<'a, T> for Offset<T> {
    const WIDTH: usize = std::mem::size_of::<UOffset>();

    #[inline(always)]
    fn read(buf: &'a [u8], loc: usize) -> T {
        let target = loc + read_uoffset(buf, loc) as usize;
        T::follow(buf, target)
    }
}

/// Typed reference to an object already written by the builder.
///
/// The value counts bytes from the end of the buffer under construction.
pub struct Offset<T> {
    value: UOffset,
    _marker: PhantomData<T>,
}

impl<T> Offset<T> {
    /// Wraps a raw offset.
    #[must_use]
    pub const fn new(value: UOffset) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Returns the raw offset.
    #[must_use]
    pub const fn value(&self) -> UOffset {
        self.value
    }

    /// Erases the target type, as stored in union value fields.
    #[must_use]
    pub const fn as_opaque(&self) -> Offset<()> {
        Offset::new(self.value)
    }
}

impl<T> Clone for Offset<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Offset<T> {}

impl<T> PartialEq for Offset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Offset<T> {}

impl<T> fmt::Debug for Offset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Offset").field(&self.value).finish()
    }
}

/// Fixed-layout struct that can be viewed in place inside a buffer.
///
/// Generated structs are `#[repr(C, packed)]` records of integers, floats
/// and nested structs, deriving `bytemuck::Pod`. Bools and enums are stored
/// as their underlying integers so that every bit pattern stays valid.
pub trait Struct: bytemuck::Pod {
    /// Alignment the struct requires inside a buffer.
    const ALIGN: usize;
}

/// Views the struct stored at `loc` without copying.
///
/// # Panics
/// Panics if the struct does not fit in `buf`, or if `T` needs an
/// alignment that `loc` does not satisfy.
#[inline]
#[must_use]
pub fn struct_at<T: Struct>(buf: &[u8], loc: usize) -> &T {
    let size = std::mem::size_of::<T>();
    assert!(
        loc + size <= buf.len(),
        "struct of {size} bytes at {loc} exceeds buffer of {} bytes",
        buf.len()
    );
    bytemuck::from_bytes(&buf[loc..loc + size])
}

/// Returns the raw bytes of a struct, as stored on the wire.
#[inline]
#[must_use]
pub fn struct_bytes<T: Struct>(value: &T) -> &[u8] {
    bytemuck::bytes_of(value)
}

/// Returns the root object of a finished buffer.
///
/// # Errors
/// Returns an error if the buffer cannot hold a root offset or the offset
/// points outside the buffer.
pub fn get_root<'a, T: Follow<'a>>(buf: &'a [u8]) -> Result<T> {
    let required = std::mem::size_of::<UOffset>();
    if buf.len() < required {
        return Err(Error::BufferTooShort {
            required,
            available: buf.len(),
        });
    }

    let loc = read_uoffset(buf, 0) as usize;
    if loc >= buf.len() {
        return Err(Error::OffsetOutOfBounds {
            offset: loc,
            size: buf.len(),
        });
    }

    Ok(T::follow(buf, loc))
}
