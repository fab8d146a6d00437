//! Field, fixed struct and table definitions.
//!
//! Fields share one shape; only their layout differs. Fixed struct fields
//! carry a byte offset plus the padding fillers inserted after them, table
//! fields carry a vtable slot index.

use crate::error::SchemaError;
use crate::types::{Namespace, QualifiedName, SchemaType};
use serde::{Deserialize, Serialize};

/// Field definition, generic over its layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef<L> {
    /// Field name.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub ty: SchemaType,
    /// Declared default/constant literal, as written in the schema.
    #[serde(default)]
    pub default: Option<String>,
    /// Field is marked required.
    #[serde(default)]
    pub required: bool,
    /// Field is deprecated and hidden from generated code.
    #[serde(default)]
    pub deprecated: bool,
    /// Field is the sort key of its table.
    #[serde(default)]
    pub key: bool,
    /// Layout information.
    #[serde(flatten)]
    pub layout: L,
}

impl<L> FieldDef<L> {
    /// Creates a field with no default and no flags.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: SchemaType, layout: L) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            required: false,
            deprecated: false,
            key: false,
            layout,
        }
    }

    /// Sets the declared default literal.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Marks the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field deprecated.
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Marks the field as key.
    #[must_use]
    pub fn key(mut self) -> Self {
        self.key = true;
        self
    }
}

/// Field of a fixed struct.
pub type StructField = FieldDef<FixedLayout>;

/// Field of a table.
pub type TableField = FieldDef<SlotLayout>;

/// Byte layout of a fixed struct field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedLayout {
    /// Byte offset from the start of the struct.
    pub offset: usize,
    /// Fillers inserted after the field, in layout order.
    #[serde(default)]
    pub padding: Vec<PaddingSlot>,
}

impl FixedLayout {
    /// Creates a layout without padding.
    #[must_use]
    pub fn at(offset: usize) -> Self {
        Self {
            offset,
            padding: Vec::new(),
        }
    }

    /// Creates a layout followed by the given fillers.
    #[must_use]
    pub fn padded(offset: usize, padding: Vec<PaddingSlot>) -> Self {
        Self { offset, padding }
    }

    /// Returns the number of padding bytes after the field.
    #[must_use]
    pub fn padding_bytes(&self) -> usize {
        self.padding.iter().map(|p| p.size.bytes()).sum()
    }
}

/// Vtable slot of a table field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotLayout {
    /// Slot index, stable across schema evolution.
    pub slot: u16,
}

impl SlotLayout {
    /// Creates a slot layout.
    #[must_use]
    pub const fn new(slot: u16) -> Self {
        Self { slot }
    }

    /// Returns the byte position of this slot inside a vtable, or `None`
    /// if it does not fit a 16-bit vtable offset.
    #[must_use]
    pub const fn vtable_offset(&self) -> Option<u16> {
        match self.slot.checked_mul(2) {
            Some(pos) => pos.checked_add(4),
            None => None,
        }
    }
}

/// Size of a padding filler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FillerSize {
    /// One byte.
    U8,
    /// Two bytes.
    U16,
    /// Four bytes.
    U32,
    /// Eight bytes.
    U64,
}

impl FillerSize {
    /// Returns the size in bytes.
    #[must_use]
    pub const fn bytes(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    /// Returns the unsigned Rust type of the same width.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }
}

impl TryFrom<u8> for FillerSize {
    type Error = SchemaError;

    fn try_from(size: u8) -> Result<Self, Self::Error> {
        match size {
            1 => Ok(Self::U8),
            2 => Ok(Self::U16),
            4 => Ok(Self::U32),
            8 => Ok(Self::U64),
            _ => Err(SchemaError::InvalidFillerSize { size }),
        }
    }
}

impl From<FillerSize> for u8 {
    fn from(size: FillerSize) -> Self {
        size.bytes() as u8
    }
}

/// Padding filler inserted into a fixed struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaddingSlot {
    /// Byte offset of the filler from the start of the struct.
    pub offset: usize,
    /// Filler width.
    pub size: FillerSize,
}

impl PaddingSlot {
    /// Creates a filler.
    #[must_use]
    pub const fn new(offset: usize, size: FillerSize) -> Self {
        Self { offset, size }
    }

    /// Expands a 4-bit padding mask into fillers placed right after a field.
    ///
    /// Bit `i` of the mask stands for a filler of `2^i` bytes; fillers are
    /// laid out from the smallest to the largest.
    ///
    /// # Errors
    /// Returns `SchemaError::InvalidPaddingMask` if bits above `0xF` are set.
    pub fn from_mask(field: &str, field_end: usize, mask: u8) -> Result<Vec<Self>, SchemaError> {
        if mask & !0xF != 0 {
            return Err(SchemaError::InvalidPaddingMask {
                field: field.to_string(),
                mask,
            });
        }

        let mut offset = field_end;
        let mut slots = Vec::new();
        for (bit, size) in [FillerSize::U8, FillerSize::U16, FillerSize::U32, FillerSize::U64]
            .into_iter()
            .enumerate()
        {
            if mask & (1 << bit) != 0 {
                slots.push(Self::new(offset, size));
                offset += size.bytes();
            }
        }
        Ok(slots)
    }
}

/// Fixed-layout struct definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    /// Struct name.
    pub name: String,
    /// Declaring namespace.
    #[serde(default)]
    pub namespace: Namespace,
    /// Fields in layout order.
    pub fields: Vec<StructField>,
    /// Total size in bytes, including trailing padding.
    pub byte_size: usize,
    /// Alignment of the largest scalar member.
    pub min_align: usize,
}

impl StructDef {
    /// Creates an empty struct definition.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            name: name.into(),
            namespace,
            fields: Vec::new(),
            byte_size: 0,
            min_align: 1,
        }
    }

    /// Adds a field, builder style.
    #[must_use]
    pub fn with_field(mut self, field: StructField) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the precomputed size and alignment.
    #[must_use]
    pub fn with_layout(mut self, byte_size: usize, min_align: usize) -> Self {
        self.byte_size = byte_size;
        self.min_align = min_align;
        self
    }

    /// Returns the qualified name of this struct.
    #[must_use]
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(self.namespace.clone(), self.name.clone())
    }

    /// Returns the field type referring to this struct.
    #[must_use]
    pub fn as_type(&self) -> SchemaType {
        SchemaType::Struct(self.qualified_name())
    }
}

/// Table definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name.
    pub name: String,
    /// Declaring namespace.
    #[serde(default)]
    pub namespace: Namespace,
    /// Fields in declaration order, deprecated ones included.
    pub fields: Vec<TableField>,
}

impl TableDef {
    /// Creates an empty table definition.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            name: name.into(),
            namespace,
            fields: Vec::new(),
        }
    }

    /// Adds a field, builder style.
    #[must_use]
    pub fn with_field(mut self, field: TableField) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the qualified name of this table.
    #[must_use]
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(self.namespace.clone(), self.name.clone())
    }

    /// Returns the field type referring to this table.
    #[must_use]
    pub fn as_type(&self) -> SchemaType {
        SchemaType::Table(self.qualified_name())
    }

    /// Returns the fields visible in generated code.
    pub fn live_fields(&self) -> impl Iterator<Item = &TableField> {
        self.fields.iter().filter(|f| !f.deprecated)
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&TableField> {
        self.fields.iter().find(|f| f.name == name)
    }
}
