//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use flatgen::prelude::*;
//! ```

// Runtime types
pub use flatgen_runtime::{
    Endian, FlatBufferBuilder, Follow, Offset, String as FbString, Struct, Table, Vector,
    get_root,
};
pub use flatgen_runtime::{Error as RuntimeError, Result as RuntimeResult};

// Schema types
pub use flatgen_schema::{
    EnumDef, Namespace, QualifiedName, ScalarKind, SchemaError, SchemaModel, SchemaType,
    StructDef, TableDef, validate_model,
};

// Codegen types
pub use flatgen_codegen::{
    CodegenError, EmittedSet, GeneratedUnit, Generator, GeneratorOptions, WriteOutcome,
    write_unit,
};
