//! Error types for schema model loading and validation.

use thiserror::Error;

/// Error type for schema model operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Padding mask uses bits outside the four filler sizes.
    #[error("invalid padding mask {mask:#x} on field '{field}'")]
    InvalidPaddingMask {
        /// Field name.
        field: String,
        /// Offending mask.
        mask: u8,
    },

    /// Scalar type name is not a known IDL keyword.
    #[error("unknown scalar type '{name}'")]
    UnknownScalar {
        /// Offending name.
        name: String,
    },

    /// Table slot whose vtable entry does not fit a 16-bit offset.
    #[error("table '{table}': slot {slot} of '{field}' is out of vtable range")]
    SlotOutOfRange {
        /// Table name.
        table: String,
        /// Field name.
        field: String,
        /// Offending slot.
        slot: u16,
    },

    /// Padding filler size is not 1, 2, 4 or 8 bytes.
    #[error("invalid padding filler size {size}")]
    InvalidFillerSize {
        /// Offending size in bytes.
        size: u8,
    },

    /// Struct field or filler does not start where the previous one ended.
    #[error("struct '{def}': '{field}' at offset {offset} does not follow offset {expected}")]
    LayoutGap {
        /// Struct name.
        def: String,
        /// Field or filler name.
        field: String,
        /// Declared offset.
        offset: usize,
        /// Offset where the previous item ended.
        expected: usize,
    },

    /// Struct fields and fillers do not add up to the declared size.
    #[error("struct '{def}': declared size {declared}, layout covers {computed}")]
    SizeMismatch {
        /// Struct name.
        def: String,
        /// Declared byte size.
        declared: usize,
        /// Size covered by fields and fillers.
        computed: usize,
    },

    /// Reference to a definition that is not part of the model.
    #[error("unknown {kind} '{name}' referenced by '{field}'")]
    UnknownDefinition {
        /// Kind of definition (struct, enum, table).
        kind: &'static str,
        /// Qualified name of the missing definition.
        name: String,
        /// Referencing field.
        field: String,
    },

    /// Field type not allowed in this context.
    #[error("field '{field}' of '{def}' has a type not allowed in {context}")]
    InvalidFieldType {
        /// Definition name.
        def: String,
        /// Field name.
        field: String,
        /// Context (fixed struct, enum, ...).
        context: &'static str,
    },

    /// Two table fields share a slot.
    #[error("table '{table}': slot {slot} used by both '{first}' and '{second}'")]
    DuplicateSlot {
        /// Table name.
        table: String,
        /// Slot index.
        slot: u16,
        /// First field.
        first: String,
        /// Second field.
        second: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
