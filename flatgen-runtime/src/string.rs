//! String views.
//!
//! A string is a `u32` byte length, the UTF-8 bytes, and a terminating NUL
//! that is not counted in the length.

use crate::endian::{UOffset, read_uoffset};
use crate::follow::Follow;
use std::fmt;

/// View of a string inside a finished buffer.
///
/// Views compare and order by their bytes, which for valid UTF-8 matches
/// `str` ordering.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct String<'a> {
    bytes: &'a [u8],
}

impl<'a> String<'a> {
    /// Returns the raw bytes, without the terminator.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the string, or an error if the bytes are not valid UTF-8.
    ///
    /// # Errors
    /// Returns `Utf8Error` on invalid UTF-8.
    pub fn to_str(&self) -> Result<&'a str, std::str::Utf8Error> {
        std::str::from_utf8(self.bytes)
    }

    /// Returns the string, or an empty string if it is not valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.to_str().unwrap_or("")
    }

    /// Returns the length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true for the empty string.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl<'a> Follow<'a> for String<'a> {
    fn follow(buf: &'a [u8], loc: usize) -> Self {
        let len = read_uoffset(buf, loc) as usize;
        let start = loc + std::mem::size_of::<UOffset>();
        Self {
            bytes: buf.get(start..start + len).unwrap_or(&[]),
        }
    }
}

impl fmt::Display for String<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&std::string::String::from_utf8_lossy(self.bytes))
    }
}

impl fmt::Debug for String<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&std::string::String::from_utf8_lossy(self.bytes), f)
    }
}

impl AsRef<str> for String<'_> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<[u8]> for String<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl PartialEq<str> for String<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for String<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}
