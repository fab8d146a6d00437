//! # flatgen Codegen
//!
//! Rust code generation from FlatBuffers-style schema models.
//!
//! This crate provides:
//! - Enum, fixed struct and table code generation
//! - Table accessors and builders targeting `flatgen-runtime`
//! - Skip tracking across generation runs
//! - Build script integration

pub mod error;
pub mod generator;
pub mod options;
pub mod output;
pub mod rust;

pub use error::CodegenError;
pub use generator::{EmittedSet, GeneratedUnit, Generator};
pub use options::GeneratorOptions;
pub use output::{WriteOutcome, generated_file_name, write_unit};

use flatgen_schema::SchemaModel;

/// Generates Rust code for a schema model with default options.
///
/// # Arguments
/// * `model` - Schema model to generate
///
/// # Returns
/// The generated unit, never `Skip` unless the model is empty.
#[must_use]
pub fn generate(model: &SchemaModel) -> GeneratedUnit {
    let options = GeneratorOptions::default();
    Generator::new(model, &options).generate(&mut EmittedSet::new())
}

/// Generates Rust code from a JSON schema model.
///
/// # Errors
/// Returns `CodegenError` if the model cannot be parsed.
pub fn generate_from_json(json: &str) -> Result<GeneratedUnit, CodegenError> {
    let model = SchemaModel::from_json(json)?;
    Ok(generate(&model))
}

/// Generates Rust code from a JSON schema model file.
///
/// # Errors
/// Returns `CodegenError` if reading or parsing fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<GeneratedUnit, CodegenError> {
    let model = SchemaModel::from_json_file(path)?;
    Ok(generate(&model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MODEL: &str = r#"{
        "name": "colors",
        "namespace": ["Paint"],
        "enums": [
            {
                "name": "Color",
                "namespace": ["Paint"],
                "underlying": "ubyte",
                "values": [ { "name": "Red", "value": 0 }, { "name": "Blue", "value": 1 } ]
            }
        ]
    }"#;

    #[test]
    fn test_generate_from_json() {
        let unit = generate_from_json(MODEL).unwrap();
        let code = unit.code().unwrap();
        assert!(code.contains("#[repr(u8)]\npub enum Color {"));
    }

    #[test]
    fn test_generate_from_json_invalid() {
        let err = generate_from_json("{ not json").unwrap_err();
        assert!(matches!(err, CodegenError::Schema(_)));
    }

    #[test]
    fn test_generate_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MODEL.as_bytes()).unwrap();

        let unit = generate_from_file(file.path()).unwrap();
        assert!(!unit.is_skip());
    }

    #[test]
    fn test_generate_from_missing_file() {
        let err = generate_from_file(std::path::Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, CodegenError::Schema(_)));
    }
}
