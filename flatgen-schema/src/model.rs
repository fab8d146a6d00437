//! Complete schema model handed to the generator.
//!
//! The model is produced upstream, with every offset, slot and padding
//! filler already computed. It can be built in code or loaded from its JSON
//! form.

use crate::definitions::{StructDef, TableDef};
use crate::error::SchemaError;
use crate::types::{EnumDef, Namespace, QualifiedName};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All definitions of one schema file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaModel {
    /// Logical schema name, used to name the generated file.
    pub name: String,
    /// Namespace of the file being generated.
    #[serde(default)]
    pub namespace: Namespace,
    /// Enum definitions in declaration order.
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    /// Fixed struct definitions in declaration order.
    #[serde(default)]
    pub structs: Vec<StructDef>,
    /// Table definitions in declaration order.
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

impl SchemaModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            name: name.into(),
            namespace,
            enums: Vec::new(),
            structs: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Parses a model from its JSON form.
    ///
    /// # Errors
    /// Returns `SchemaError::Json` if the document does not describe a model.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a model from a JSON file.
    ///
    /// # Errors
    /// Returns `SchemaError` if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, SchemaError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the model to pretty-printed JSON.
    ///
    /// # Errors
    /// Returns `SchemaError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Adds an enum definition.
    pub fn add_enum(&mut self, def: EnumDef) {
        self.enums.push(def);
    }

    /// Adds a fixed struct definition.
    pub fn add_struct(&mut self, def: StructDef) {
        self.structs.push(def);
    }

    /// Adds a table definition.
    pub fn add_table(&mut self, def: TableDef) {
        self.tables.push(def);
    }

    /// Looks up an enum by qualified name.
    #[must_use]
    pub fn find_enum(&self, name: &QualifiedName) -> Option<&EnumDef> {
        self.enums
            .iter()
            .find(|e| e.name == name.name && e.namespace == name.namespace)
    }

    /// Looks up a fixed struct by qualified name.
    #[must_use]
    pub fn find_struct(&self, name: &QualifiedName) -> Option<&StructDef> {
        self.structs
            .iter()
            .find(|s| s.name == name.name && s.namespace == name.namespace)
    }

    /// Looks up a table by qualified name.
    #[must_use]
    pub fn find_table(&self, name: &QualifiedName) -> Option<&TableDef> {
        self.tables
            .iter()
            .find(|t| t.name == name.name && t.namespace == name.namespace)
    }

    /// Returns true if the model has no definitions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.structs.is_empty() && self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::{FixedLayout, SlotLayout, StructField, TableField};
    use crate::types::{ScalarKind, SchemaType};
    use std::io::Write;

    fn sample_model() -> SchemaModel {
        let ns = Namespace::parse("Game");
        let mut model = SchemaModel::new("game", ns.clone());
        model.add_enum(
            EnumDef::new("Color", ns.clone(), ScalarKind::Byte)
                .with_value("Red", 0)
                .with_value("Blue", 2),
        );
        model.add_struct(
            StructDef::new("Vec2", ns.clone())
                .with_field(StructField::new(
                    "x",
                    SchemaType::Scalar(ScalarKind::Float),
                    FixedLayout::at(0),
                ))
                .with_field(StructField::new(
                    "y",
                    SchemaType::Scalar(ScalarKind::Float),
                    FixedLayout::at(4),
                ))
                .with_layout(8, 4),
        );
        model.add_table(
            TableDef::new("Stats", ns).with_field(
                TableField::new("a", SchemaType::Scalar(ScalarKind::Int), SlotLayout::new(0))
                    .with_default("5"),
            ),
        );
        model
    }

    #[test]
    fn test_model_lookup() {
        let model = sample_model();
        let ns = Namespace::parse("Game");

        assert!(model.find_enum(&QualifiedName::new(ns.clone(), "Color")).is_some());
        assert!(model.find_struct(&QualifiedName::new(ns.clone(), "Vec2")).is_some());
        assert!(model.find_table(&QualifiedName::new(ns, "Stats")).is_some());
        assert!(
            model
                .find_table(&QualifiedName::new(Namespace::default(), "Stats"))
                .is_none()
        );
        assert!(!model.is_empty());
        assert!(SchemaModel::default().is_empty());
    }

    #[test]
    fn test_model_json_roundtrip() {
        let model = sample_model();
        let json = model.to_json().unwrap();
        let parsed = SchemaModel::from_json(&json).unwrap();
        assert_eq!(parsed, model);
    }

    #[test]
    fn test_model_from_json_defaults() {
        let model = SchemaModel::from_json(r#"{"name":"empty"}"#).unwrap();
        assert_eq!(model.name, "empty");
        assert!(model.namespace.is_root());
        assert!(model.is_empty());
    }

    #[test]
    fn test_model_from_json_invalid() {
        let err = SchemaModel::from_json(r#"{"enums":[]}"#).unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn test_model_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_model().to_json().unwrap().as_bytes())
            .unwrap();

        let model = SchemaModel::from_json_file(file.path()).unwrap();
        assert_eq!(model.name, "game");
        assert_eq!(model.tables.len(), 1);
    }

    #[test]
    fn test_model_from_missing_file() {
        let err = SchemaModel::from_json_file(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Io(_)));
    }
}
