//! Buffer builder.
//!
//! The builder writes back to front: every object is prepended to the data
//! already written, and an [`Offset`] counts bytes from the end of the
//! buffer. Children must therefore be created before the tables that point
//! to them, and only one table may be open at a time.

use crate::endian::{Endian, SOffset, UOffset, VOffset};
use crate::follow::{Offset, Struct, struct_bytes};
use crate::string::String;
use crate::vector::Vector;
use std::marker::PhantomData;

const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct FieldLoc {
    offset: UOffset,
    slot: VOffset,
}

/// Builds a finished buffer back to front.
#[derive(Debug)]
pub struct FlatBufferBuilder<'fbb> {
    buf: Vec<u8>,
    head: usize,
    field_locs: Vec<FieldLoc>,
    table_open: bool,
    min_align: usize,
    force_defaults: bool,
    finished: bool,
    _phantom: PhantomData<&'fbb ()>,
}

impl Default for FlatBufferBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'fbb> FlatBufferBuilder<'fbb> {
    /// Creates a builder with a default initial capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a builder with the given initial capacity in bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            head: capacity,
            field_locs: Vec::new(),
            table_open: false,
            min_align: 1,
            force_defaults: true,
            finished: false,
            _phantom: PhantomData,
        }
    }

    /// Controls whether scalars equal to their default are written.
    ///
    /// Defaults to `true`: every field passed to `add_scalar` is stored.
    /// With `false`, a value equal to its default is elided and readers fall
    /// back to the default.
    pub fn force_defaults(&mut self, force: bool) {
        self.force_defaults = force;
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn used_space(&self) -> usize {
        self.buf.len() - self.head
    }

    /// Clears the builder for reuse, keeping its allocation.
    pub fn reset(&mut self) {
        self.buf.fill(0);
        self.head = self.buf.len();
        self.field_locs.clear();
        self.table_open = false;
        self.min_align = 1;
        self.finished = false;
    }

    fn ensure_capacity(&mut self, want: usize) {
        if self.head >= want {
            return;
        }
        let used = self.used_space();
        let mut new_len = self.buf.len().max(16);
        while new_len - used < want {
            new_len *= 2;
        }
        let mut grown = vec![0; new_len];
        grown[new_len - used..].copy_from_slice(&self.buf[self.head..]);
        self.head = new_len - used;
        self.buf = grown;
    }

    fn make_space(&mut self, len: usize) -> usize {
        self.ensure_capacity(len);
        self.head -= len;
        self.head
    }

    /// Pads so that, after `additional` more bytes, the data written is a
    /// multiple of `alignment`.
    fn align(&mut self, additional: usize, alignment: usize) {
        self.min_align = self.min_align.max(alignment);
        let pad = padding_bytes(self.used_space() + additional, alignment);
        let start = self.make_space(pad);
        self.buf[start..start + pad].fill(0);
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        let start = self.make_space(bytes.len());
        self.buf[start..start + bytes.len()].copy_from_slice(bytes);
    }

    fn push_scalar<T: Endian>(&mut self, value: T) -> UOffset {
        self.align(T::SIZE, T::SIZE);
        let start = self.make_space(T::SIZE);
        value.write_le(&mut self.buf[start..]);
        self.used_space() as UOffset
    }

    fn push_uoffset(&mut self, target: UOffset) -> UOffset {
        self.align(4, 4);
        let used = self.used_space() as UOffset;
        assert!(target <= used, "offset {target} refers past the data written");
        self.push_scalar::<UOffset>(used + 4 - target)
    }

    fn assert_not_nested(&self, what: &str) {
        assert!(!self.table_open, "{what} called while a table is open");
    }

    fn track_field(&mut self, slot: VOffset, offset: UOffset) {
        self.field_locs.push(FieldLoc { offset, slot });
    }

    /// Opens a table; fields are added with the `add_*` methods.
    ///
    /// # Panics
    /// Panics if another table is already open.
    pub fn start_table(&mut self) -> UOffset {
        self.assert_not_nested("start_table");
        self.table_open = true;
        self.field_locs.clear();
        self.used_space() as UOffset
    }

    /// Adds a scalar field at `slot`.
    pub fn add_scalar<T: Endian>(&mut self, slot: VOffset, value: T, default: T) {
        if !self.force_defaults && value == default {
            return;
        }
        let offset = self.push_scalar(value);
        self.track_field(slot, offset);
    }

    /// Adds an inline struct field at `slot`.
    pub fn add_struct<T: Struct>(&mut self, slot: VOffset, value: &T) {
        self.align(std::mem::size_of::<T>(), T::ALIGN);
        self.push_bytes(struct_bytes(value));
        let offset = self.used_space() as UOffset;
        self.track_field(slot, offset);
    }

    /// Adds an offset field (string, vector, table) at `slot`.
    pub fn add_offset<T>(&mut self, slot: VOffset, value: Offset<T>) {
        let offset = self.push_uoffset(value.value());
        self.track_field(slot, offset);
    }

    /// Closes the open table and writes its vtable.
    ///
    /// The vtable covers `num_fields` slots, or more if a higher slot was
    /// written. Returns the offset of the table.
    ///
    /// # Panics
    /// Panics if no table is open.
    pub fn end_table(&mut self, start: UOffset, num_fields: usize) -> UOffset {
        assert!(self.table_open, "end_table called without start_table");

        let object_offset = self.push_scalar::<SOffset>(0);
        let num_slots = self
            .field_locs
            .iter()
            .map(|f| usize::from(f.slot) + 1)
            .max()
            .unwrap_or(0)
            .max(num_fields);

        let mut entries: Vec<VOffset> = vec![0; num_slots];
        for field in &self.field_locs {
            entries[usize::from(field.slot)] = (object_offset - field.offset) as VOffset;
        }

        for entry in entries.iter().rev() {
            self.push_scalar::<VOffset>(*entry);
        }
        self.push_scalar::<VOffset>((object_offset - start) as VOffset);
        let vtable_offset = self.push_scalar::<VOffset>(((num_slots + 2) * 2) as VOffset);

        let table_loc = self.buf.len() - object_offset as usize;
        let soffset = vtable_offset as SOffset - object_offset as SOffset;
        soffset.write_le(&mut self.buf[table_loc..]);

        self.field_locs.clear();
        self.table_open = false;
        object_offset
    }

    /// Writes a string and returns its offset.
    pub fn create_string(&mut self, s: &str) -> Offset<String<'fbb>> {
        self.assert_not_nested("create_string");
        self.align(s.len() + 1, 4);
        self.push_bytes(&[0]);
        self.push_bytes(s.as_bytes());
        Offset::new(self.push_scalar(s.len() as UOffset))
    }

    /// Writes a vector of scalars and returns its offset.
    pub fn create_vector<T: Endian>(&mut self, items: &[T]) -> Offset<Vector<'fbb, T>> {
        self.assert_not_nested("create_vector");
        let len = items.len() * T::SIZE;
        self.align(len, 4);
        self.align(len, T::SIZE);
        for item in items.iter().rev() {
            let start = self.make_space(T::SIZE);
            item.write_le(&mut self.buf[start..]);
        }
        Offset::new(self.push_scalar(items.len() as UOffset))
    }

    /// Writes a vector of inline structs and returns its offset.
    pub fn create_vector_of_structs<T: Struct>(
        &mut self,
        items: &[T],
    ) -> Offset<Vector<'fbb, &'fbb T>> {
        self.assert_not_nested("create_vector_of_structs");
        let len = items.len() * std::mem::size_of::<T>();
        self.align(len, 4);
        self.align(len, T::ALIGN);
        for item in items.iter().rev() {
            self.push_bytes(struct_bytes(item));
        }
        Offset::new(self.push_scalar(items.len() as UOffset))
    }

    /// Writes a vector of offsets (tables or strings) and returns its offset.
    pub fn create_vector_of_offsets<T>(
        &mut self,
        items: &[Offset<T>],
    ) -> Offset<Vector<'fbb, Offset<T>, T>> {
        self.assert_not_nested("create_vector_of_offsets");
        self.align(items.len() * 4, 4);
        for item in items.iter().rev() {
            self.push_uoffset(item.value());
        }
        Offset::new(self.push_scalar(items.len() as UOffset))
    }

    /// Writes the root offset, completing the buffer.
    ///
    /// # Panics
    /// Panics if a table is still open.
    pub fn finish<T>(&mut self, root: Offset<T>) {
        self.assert_not_nested("finish");
        let min_align = self.min_align;
        self.align(4, min_align);
        self.push_uoffset(root.value());
        self.finished = true;
    }

    /// Returns the finished buffer.
    ///
    /// # Panics
    /// Panics if `finish` has not been called.
    #[must_use]
    pub fn finished_data(&self) -> &[u8] {
        assert!(self.finished, "finished_data called before finish");
        &self.buf[self.head..]
    }
}

/// Number of zero bytes needed to bring `len` up to a multiple of
/// `alignment` (a power of two).
fn padding_bytes(len: usize, alignment: usize) -> usize {
    (!len).wrapping_add(1) & (alignment - 1)
}
