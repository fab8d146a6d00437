//! # flatgen Schema
//!
//! Schema model consumed by the flatgen code generator.
//!
//! This crate provides:
//! - Type descriptors for scalars, enums, structs, tables, strings and vectors
//! - Field, fixed struct and table definitions with precomputed layouts
//! - A JSON form of the complete model
//! - Validation helpers for layout tiling, enum values and table slots

pub mod definitions;
pub mod error;
pub mod model;
pub mod types;
pub mod validation;

pub use definitions::{
    FieldDef, FillerSize, FixedLayout, PaddingSlot, SlotLayout, StructDef, StructField, TableDef,
    TableField,
};
pub use error::SchemaError;
pub use model::SchemaModel;
pub use types::{EnumDef, EnumVal, Namespace, QualifiedName, ScalarKind, SchemaType};
pub use validation::validate_model;
