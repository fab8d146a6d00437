//! Little-endian scalar access.
//!
//! Every scalar on the wire is stored little-endian. The [`Endian`] trait
//! converts between host and wire order, and reads or writes a scalar at a
//! byte position of a buffer.

/// Unsigned offset, used for forward references inside a buffer.
pub type UOffset = u32;

/// Signed offset, used for the table to vtable link.
pub type SOffset = i32;

/// Vtable entry: byte offset of a field inside its table.
pub type VOffset = u16;

/// Scalar that can be stored little-endian on the wire.
pub trait Endian: Copy + PartialEq {
    /// Size of the scalar in bytes.
    const SIZE: usize;

    /// Converts a host value to wire order.
    fn to_le(self) -> Self;

    /// Converts a wire value to host order.
    fn from_le(self) -> Self;

    /// Reads the scalar at `loc`.
    ///
    /// # Panics
    /// Panics if `buf` holds fewer than `SIZE` bytes at `loc`.
    fn read_le(buf: &[u8], loc: usize) -> Self;

    /// Writes the scalar to the first `SIZE` bytes of `dst`.
    ///
    /// # Panics
    /// Panics if `dst` is shorter than `SIZE`.
    fn write_le(self, dst: &mut [u8]);
}

macro_rules! impl_endian_int {
    ($($t:ty),*) => {
        $(
            impl Endian for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                #[inline(always)]
                fn to_le(self) -> Self {
                    <$t>::to_le(self)
                }

                #[inline(always)]
                fn from_le(self) -> Self {
                    <$t>::from_le(self)
                }

                #[inline(always)]
                fn read_le(buf: &[u8], loc: usize) -> Self {
                    let mut bytes = [0u8; std::mem::size_of::<$t>()];
                    bytes.copy_from_slice(&buf[loc..loc + Self::SIZE]);
                    <$t>::from_le_bytes(bytes)
                }

                #[inline(always)]
                fn write_le(self, dst: &mut [u8]) {
                    dst[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_endian_int!(u8, i8, u16, i16, u32, i32, u64, i64);

macro_rules! impl_endian_float {
    ($($t:ty => $bits:ty),*) => {
        $(
            impl Endian for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                #[inline(always)]
                fn to_le(self) -> Self {
                    <$t>::from_bits(<$bits>::to_le(self.to_bits()))
                }

                #[inline(always)]
                fn from_le(self) -> Self {
                    <$t>::from_bits(<$bits>::from_le(self.to_bits()))
                }

                #[inline(always)]
                fn read_le(buf: &[u8], loc: usize) -> Self {
                    <$t>::from_bits(<$bits as Endian>::read_le(buf, loc))
                }

                #[inline(always)]
                fn write_le(self, dst: &mut [u8]) {
                    self.to_bits().write_le(dst);
                }
            }
        )*
    };
}

impl_endian_float!(f32 => u32, f64 => u64);

impl Endian for bool {
    const SIZE: usize = 1;

    #[inline(always)]
    fn to_le(self) -> Self {
        self
    }

    #[inline(always)]
    fn from_le(self) -> Self {
        self
    }

    #[inline(always)]
    fn read_le(buf: &[u8], loc: usize) -> Self {
        buf[loc] != 0
    }

    #[inline(always)]
    fn write_le(self, dst: &mut [u8]) {
        dst[0] = u8::from(self);
    }
}

/// Reads an unsigned offset at `loc`.
#[inline(always)]
#[must_use]
pub fn read_uoffset(buf: &[u8], loc: usize) -> UOffset {
    UOffset::read_le(buf, loc)
}
