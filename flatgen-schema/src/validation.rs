//! Schema model validation utilities.
//!
//! The generator trusts its input: offsets, padding and slots come
//! precomputed from the upstream elaborator. These checks let callers and
//! tests confirm a model honors those invariants before handing it over.

use crate::definitions::{StructDef, TableDef};
use crate::error::SchemaError;
use crate::model::SchemaModel;
use crate::types::{EnumDef, SchemaType};
use std::collections::{HashMap, HashSet};

/// Validates a schema model for consistency.
///
/// # Arguments
/// * `model` - The model to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the first issue found.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_model(model: &SchemaModel) -> Result<(), SchemaError> {
    validate_unique_names(model)?;
    for enum_def in &model.enums {
        validate_enum(enum_def)?;
    }
    for struct_def in &model.structs {
        validate_struct(model, struct_def)?;
    }
    for table in &model.tables {
        validate_table(table)?;
    }
    Ok(())
}

/// Rejects two definitions sharing a qualified name.
fn validate_unique_names(model: &SchemaModel) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    let names = model
        .enums
        .iter()
        .map(EnumDef::qualified_name)
        .chain(model.structs.iter().map(StructDef::qualified_name))
        .chain(model.tables.iter().map(TableDef::qualified_name));

    for name in names {
        if !seen.insert(name.clone()) {
            return Err(SchemaError::validation(format!(
                "Duplicate definition name '{name}'"
            )));
        }
    }
    Ok(())
}

/// Validates an enum definition.
pub fn validate_enum(enum_def: &EnumDef) -> Result<(), SchemaError> {
    if !enum_def.underlying.is_integer() {
        return Err(SchemaError::validation(format!(
            "Enum '{}' uses non-integer underlying type '{}'",
            enum_def.name,
            enum_def.underlying.idl_name()
        )));
    }

    let mut seen_names = HashSet::new();
    let mut seen_values = HashSet::new();

    for value in &enum_def.values {
        if !seen_names.insert(&value.name) {
            return Err(SchemaError::validation(format!(
                "Duplicate enum value name '{}' in enum '{}'",
                value.name, enum_def.name
            )));
        }

        if !seen_values.insert(value.value) {
            return Err(SchemaError::validation(format!(
                "Duplicate enum value '{}' in enum '{}'",
                value.value, enum_def.name
            )));
        }
    }

    Ok(())
}

/// Validates that the fields and fillers of a fixed struct tile its size.
///
/// Nested struct sizes are resolved through `model`.
pub fn validate_struct(model: &SchemaModel, struct_def: &StructDef) -> Result<(), SchemaError> {
    let mut expected = 0;

    for field in &struct_def.fields {
        let size = match &field.ty {
            SchemaType::Scalar(kind) => kind.size(),
            SchemaType::Enum { underlying, .. } => underlying.size(),
            SchemaType::Struct(name) => model
                .find_struct(name)
                .map(|nested| nested.byte_size)
                .ok_or_else(|| SchemaError::UnknownDefinition {
                    kind: "struct",
                    name: name.to_string(),
                    field: field.name.clone(),
                })?,
            _ => {
                return Err(SchemaError::InvalidFieldType {
                    def: struct_def.name.clone(),
                    field: field.name.clone(),
                    context: "fixed struct",
                });
            }
        };

        if field.layout.offset != expected {
            return Err(SchemaError::LayoutGap {
                def: struct_def.name.clone(),
                field: field.name.clone(),
                offset: field.layout.offset,
                expected,
            });
        }
        expected += size;

        let mut filler_at = expected;
        for filler in &field.layout.padding {
            if filler.offset != filler_at {
                return Err(SchemaError::LayoutGap {
                    def: struct_def.name.clone(),
                    field: format!("padding after '{}'", field.name),
                    offset: filler.offset,
                    expected: filler_at,
                });
            }
            filler_at += filler.size.bytes();
        }
        expected += field.layout.padding_bytes();
    }

    if expected != struct_def.byte_size {
        return Err(SchemaError::SizeMismatch {
            def: struct_def.name.clone(),
            declared: struct_def.byte_size,
            computed: expected,
        });
    }

    Ok(())
}

/// Validates that every slot has a vtable entry and no two table fields
/// share a slot.
pub fn validate_table(table: &TableDef) -> Result<(), SchemaError> {
    let mut slots: HashMap<u16, &str> = HashMap::new();

    for field in &table.fields {
        if field.layout.vtable_offset().is_none() {
            return Err(SchemaError::SlotOutOfRange {
                table: table.name.clone(),
                field: field.name.clone(),
                slot: field.layout.slot,
            });
        }
        if let Some(first) = slots.insert(field.layout.slot, &field.name) {
            return Err(SchemaError::DuplicateSlot {
                table: table.name.clone(),
                slot: field.layout.slot,
                first: first.to_string(),
                second: field.name.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::{FillerSize, FixedLayout, PaddingSlot, SlotLayout, StructField, TableField};
    use crate::types::{Namespace, ScalarKind};

    fn vec3(ns: &Namespace) -> StructDef {
        let float = SchemaType::Scalar(ScalarKind::Float);
        StructDef::new("Vec3", ns.clone())
            .with_field(StructField::new("x", float.clone(), FixedLayout::at(0)))
            .with_field(StructField::new("y", float.clone(), FixedLayout::at(4)))
            .with_field(StructField::new("z", float, FixedLayout::at(8)))
            .with_layout(12, 4)
    }

    fn padded_model() -> SchemaModel {
        let ns = Namespace::parse("Game");
        let mut model = SchemaModel::new("game", ns.clone());
        let color = EnumDef::new("Color", ns.clone(), ScalarKind::Byte)
            .with_value("Red", 0)
            .with_value("Green", 1);
        let vec3 = vec3(&ns);
        let cell = StructDef::new("Cell", ns.clone())
            .with_field(StructField::new(
                "tag",
                SchemaType::Scalar(ScalarKind::Bool),
                FixedLayout::padded(0, vec![PaddingSlot::new(1, FillerSize::U8)]),
            ))
            .with_field(StructField::new(
                "id",
                SchemaType::Scalar(ScalarKind::Short),
                FixedLayout::at(2),
            ))
            .with_field(StructField::new(
                "color",
                color.as_type(),
                FixedLayout::padded(
                    4,
                    vec![
                        PaddingSlot::new(5, FillerSize::U8),
                        PaddingSlot::new(6, FillerSize::U16),
                    ],
                ),
            ))
            .with_field(StructField::new("pos", vec3.as_type(), FixedLayout::at(8)))
            .with_layout(20, 4);
        model.add_enum(color);
        model.add_struct(vec3);
        model.add_struct(cell);
        model
    }

    #[test]
    fn test_validate_valid_model() {
        assert!(validate_model(&padded_model()).is_ok());
    }

    #[test]
    fn test_validate_layout_gap() {
        let mut model = padded_model();
        model.structs[1].fields[1].layout.offset = 3;

        let err = validate_model(&model).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::LayoutGap { offset: 3, expected: 2, .. }
        ));
    }

    #[test]
    fn test_validate_missing_filler() {
        let mut model = padded_model();
        model.structs[1].fields[2].layout.padding.pop();

        let err = validate_model(&model).unwrap_err();
        assert!(matches!(err, SchemaError::LayoutGap { offset: 8, expected: 6, .. }));
    }

    #[test]
    fn test_validate_size_mismatch() {
        let mut model = padded_model();
        model.structs[1].byte_size = 24;

        let err = validate_model(&model).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::SizeMismatch { declared: 24, computed: 20, .. }
        ));
    }

    #[test]
    fn test_validate_unknown_nested_struct() {
        let mut model = padded_model();
        model.structs.remove(0);

        let err = validate_model(&model).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownDefinition { kind: "struct", .. }));
    }

    #[test]
    fn test_validate_struct_rejects_offset_types() {
        let ns = Namespace::default();
        let mut model = SchemaModel::new("bad", ns.clone());
        model.add_struct(
            StructDef::new("Named", ns)
                .with_field(StructField::new("name", SchemaType::String, FixedLayout::at(0)))
                .with_layout(4, 4),
        );

        let err = validate_model(&model).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFieldType { context: "fixed struct", .. }));
    }

    #[test]
    fn test_validate_duplicate_enum_value() {
        let color = EnumDef::new("Color", Namespace::default(), ScalarKind::Byte)
            .with_value("Red", 0)
            .with_value("Crimson", 0);
        assert!(validate_enum(&color).is_err());

        let color = EnumDef::new("Color", Namespace::default(), ScalarKind::Byte)
            .with_value("Red", 0)
            .with_value("Red", 1);
        assert!(validate_enum(&color).is_err());
    }

    #[test]
    fn test_validate_enum_underlying_kind() {
        let ratio = EnumDef::new("Ratio", Namespace::default(), ScalarKind::Float);
        assert!(validate_enum(&ratio).is_err());
    }

    #[test]
    fn test_validate_duplicate_slot() {
        let table = TableDef::new("Stats", Namespace::default())
            .with_field(TableField::new(
                "hp",
                SchemaType::Scalar(ScalarKind::Int),
                SlotLayout::new(0),
            ))
            .with_field(TableField::new(
                "mana",
                SchemaType::Scalar(ScalarKind::Short),
                SlotLayout::new(0),
            ));

        let err = validate_table(&table).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateSlot { slot: 0, .. }));
    }

    #[test]
    fn test_validate_duplicate_definition_name() {
        let mut model = padded_model();
        model.add_table(TableDef::new("Vec3", Namespace::parse("Game")));

        assert!(validate_model(&model).is_err());
    }

    #[test]
    fn test_validate_slot_out_of_range() {
        let table = TableDef::new("Wide", Namespace::default()).with_field(TableField::new(
            "last",
            SchemaType::Scalar(ScalarKind::Int),
            SlotLayout::new(40000),
        ));

        let err = validate_table(&table).unwrap_err();
        assert!(matches!(err, SchemaError::SlotOutOfRange { slot: 40000, .. }));

        let table = TableDef::new("Wide", Namespace::default()).with_field(TableField::new(
            "last",
            SchemaType::Scalar(ScalarKind::Int),
            SlotLayout::new(32765),
        ));
        assert!(validate_table(&table).is_ok());
    }
}
