//! Read access to tables through their vtable.
//!
//! A table starts with a signed offset to its vtable. The vtable lists the
//! byte offset of every field inside the table, indexed by slot; a missing
//! or zero entry means the field is absent.

use crate::endian::{Endian, SOffset, VOffset, read_uoffset};
use crate::follow::{Follow, Struct, struct_at};

/// Untyped view of a table; generated accessors wrap it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table<'a> {
    buf: &'a [u8],
    loc: usize,
}

impl<'a> Table<'a> {
    /// Creates a table view at the given position.
    #[must_use]
    pub const fn new(buf: &'a [u8], loc: usize) -> Self {
        Self { buf, loc }
    }

    /// Returns the underlying buffer.
    #[must_use]
    pub const fn buf(&self) -> &'a [u8] {
        self.buf
    }

    /// Returns the position of the table in the buffer.
    #[must_use]
    pub const fn loc(&self) -> usize {
        self.loc
    }

    /// Returns the position of the vtable in the buffer.
    #[must_use]
    pub fn vtable(&self) -> usize {
        let soffset = SOffset::read_le(self.buf, self.loc);
        (self.loc as i64 - i64::from(soffset)) as usize
    }

    /// Returns the byte offset of a field inside the table, or 0 if the
    /// slot is absent.
    #[must_use]
    pub fn field_offset(&self, slot: VOffset) -> VOffset {
        let vtable = self.vtable();
        let vtable_size = VOffset::read_le(self.buf, vtable);
        let entry = 4 + 2 * slot;
        if entry < vtable_size {
            VOffset::read_le(self.buf, vtable + usize::from(entry))
        } else {
            0
        }
    }

    /// Returns true if the field at `slot` is present.
    #[must_use]
    pub fn check_field(&self, slot: VOffset) -> bool {
        self.field_offset(slot) != 0
    }

    /// Reads a scalar field, or `default` when the slot is absent.
    #[must_use]
    pub fn get_field<T: Endian>(&self, slot: VOffset, default: T) -> T {
        match self.field_offset(slot) {
            0 => default,
            offset => T::read_le(self.buf, self.loc + usize::from(offset)),
        }
    }

    /// Follows an offset field (string, vector, table), or `None` when the
    /// slot is absent.
    #[must_use]
    pub fn get_ref<P: Follow<'a>>(&self, slot: VOffset) -> Option<P> {
        match self.field_offset(slot) {
            0 => None,
            offset => {
                let field = self.loc + usize::from(offset);
                let target = field + read_uoffset(self.buf, field) as usize;
                Some(P::follow(self.buf, target))
            }
        }
    }

    /// Views an inline struct field in place, or `None` when the slot is
    /// absent.
    #[must_use]
    pub fn get_struct<S: Struct>(&self, slot: VOffset) -> Option<&'a S> {
        match self.field_offset(slot) {
            0 => None,
            offset => Some(struct_at(self.buf, self.loc + usize::from(offset))),
        }
    }
}

impl<'a> Follow<'a> for Table<'a> {
    #[inline]
    fn follow(buf: &'a [u8], loc: usize) -> Self {
        Self::new(buf, loc)
    }
}
