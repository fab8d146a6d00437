//! # flatgen
//!
//! FlatBuffers-style schema to Rust code generator.
//!
//! flatgen turns a resolved schema model (enums, fixed-layout structs and
//! tables with precomputed layouts) into Rust source that reads and writes
//! the FlatBuffers wire format through a small zero-copy runtime.
//!
//! ## Features
//!
//! - **Zero-copy reads** - Generated table accessors view fields in place
//! - **Schema evolution** - Table fields are addressed by permanent vtable slots
//! - **Exact struct layout** - Packed records reproduce the computed padding
//! - **Build script integration** - Generate into `OUT_DIR` and `include!` the result
//!
//! ## Quick Start
//!
//! ```ignore
//! // build.rs
//! use flatgen::codegen::{EmittedSet, Generator, GeneratorOptions, write_unit};
//! use flatgen::schema::SchemaModel;
//!
//! let model = SchemaModel::from_json_file("schema/monster.json".as_ref())?;
//! let options = GeneratorOptions::new().runtime_crate("flatgen::runtime");
//! let unit = Generator::new(&model, &options).generate(&mut EmittedSet::new());
//! write_unit(std::env::var("OUT_DIR")?.as_ref(), &model.name, &unit)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`runtime`] - Buffer views, vtable lookup and the buffer builder
//! - [`schema`] - Schema model, JSON loading and validation
//! - [`codegen`] - Rust code generation from schema models

pub mod prelude;

/// Wire format runtime used by generated code.
pub mod runtime {
    pub use flatgen_runtime::*;
}

/// Schema model and validation.
pub mod schema {
    pub use flatgen_schema::*;
}

/// Code generation from schema models.
pub mod codegen {
    pub use flatgen_codegen::*;
}
