//! Rust code generation modules.

pub mod enums;
pub mod structs;
pub mod tables;
pub mod types;

pub use enums::EnumGenerator;
pub use structs::StructGenerator;
pub use tables::TableGenerator;
pub use types::{Cast, TypeMapper};
