//! Table accessor and builder code generation.
//!
//! Each table yields two types: a zero-copy accessor wrapping `fb::Table`
//! that reads fields by vtable slot, and a builder bound to a
//! `fb::FlatBufferBuilder` that writes them. Deprecated fields keep their
//! slot but get neither an accessor nor a builder method.

use crate::rust::types::{Cast, TypeMapper, default_literal, field_ident};
use flatgen_schema::SchemaModel;
use flatgen_schema::definitions::{TableDef, TableField};
use flatgen_schema::types::SchemaType;

/// Generator for table accessors and builders.
pub struct TableGenerator<'a> {
    mapper: &'a TypeMapper<'a>,
    model: &'a SchemaModel,
}

impl<'a> TableGenerator<'a> {
    /// Creates a new table generator.
    ///
    /// `model` is used to resolve enum defaults given by value name.
    #[must_use]
    pub fn new(mapper: &'a TypeMapper<'a>, model: &'a SchemaModel) -> Self {
        Self { mapper, model }
    }

    /// Generates the accessor and builder of a table.
    #[must_use]
    pub fn generate(&self, table: &TableDef) -> String {
        let mut output = String::new();
        output.push_str(&self.generate_accessor(table));
        output.push_str(&self.generate_builder(table));
        output
    }

    /// Returns the default literal of a scalar field.
    fn default_value(&self, field: &TableField) -> String {
        let constant = field.default.as_deref();
        match &field.ty {
            SchemaType::Enum { def, underlying } => {
                let Some(constant) = constant.map(str::trim).filter(|c| !c.is_empty()) else {
                    return default_literal(*underlying, None);
                };
                let value = constant.parse::<i64>().ok().or_else(|| {
                    self.model
                        .find_enum(def)
                        .and_then(|e| e.get_value(constant))
                        .map(|v| v.value)
                });
                match value {
                    Some(value) => value.to_string(),
                    None => {
                        tracing::warn!(
                            "Default {} of field {} is not a value of enum {}, using 0",
                            constant,
                            field.name,
                            def
                        );
                        default_literal(*underlying, None)
                    }
                }
            }
            SchemaType::Scalar(kind) => default_literal(*kind, constant),
            _ => String::new(),
        }
    }

    /// Generates the accessor type.
    fn generate_accessor(&self, table: &TableDef) -> String {
        let mut output = String::new();
        let name = &table.name;

        output.push_str(&format!("/// {} table accessor (zero-copy).\n", name));
        output.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq)]\n");
        output.push_str(&format!("pub struct {}<'a> {{\n", name));
        output.push_str("    inner: fb::Table<'a>,\n");
        output.push_str("}\n\n");

        output.push_str(&format!("impl<'a> fb::Follow<'a> for {}<'a> {{\n", name));
        output.push_str("    #[inline]\n");
        output.push_str("    fn follow(buf: &'a [u8], loc: usize) -> Self {\n");
        output.push_str("        Self {\n");
        output.push_str("            inner: fb::Table::new(buf, loc),\n");
        output.push_str("        }\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str(&format!("impl<'a> {}<'a> {{\n", name));
        for field in table.live_fields() {
            output.push_str(&self.generate_field_getter(field));
        }
        output.push_str("}\n\n");

        output
    }

    /// Generates a field getter method.
    fn generate_field_getter(&self, field: &TableField) -> String {
        let mut output = String::new();
        let slot = field.layout.slot;

        let (return_type, body) = match &field.ty {
            SchemaType::Scalar(kind) => (
                self.mapper.get_type(&field.ty, "", "", "", true),
                format!(
                    "self.inner.get_field::<{}>({}, {})",
                    kind.rust_type(),
                    slot,
                    self.default_value(field)
                ),
            ),
            SchemaType::Enum { underlying, .. } => {
                let read = format!(
                    "self.inner.get_field::<{}>({}, {})",
                    underlying.rust_type(),
                    slot,
                    self.default_value(field)
                );
                (
                    format!("Option<{}>", self.mapper.get_type(&field.ty, "", "", "", true)),
                    self.mapper.underlying_cast(&field.ty, Cast::FromWire, &read),
                )
            }
            SchemaType::Struct(_) => {
                let view = self.mapper.pointer_type(&field.ty);
                (
                    format!("Option<&'a {}>", view),
                    format!("self.inner.get_struct::<{}>({})", view, slot),
                )
            }
            _ => {
                let view = self.mapper.pointer_type(&field.ty);
                (
                    format!("Option<{}>", view),
                    format!("self.inner.get_ref::<{}>({})", view, slot),
                )
            }
        };

        output.push_str(&format!(
            "    /// Field: {} (slot {}).\n",
            field.name, slot
        ));
        output.push_str("    #[inline]\n");
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn {}(&self) -> {} {{\n",
            field_ident(&field.name),
            return_type
        ));
        output.push_str(&format!("        {}\n", body));
        output.push_str("    }\n\n");

        output
    }

    /// Generates the builder type.
    fn generate_builder(&self, table: &TableDef) -> String {
        let mut output = String::new();
        let name = &table.name;
        let builder_name = format!("{}Builder", name);
        let mapper = self.mapper.with_lifetime("'fbb");

        output.push_str(&format!("/// Builder for {} tables.\n", name));
        output.push_str(&format!("pub struct {}<'a, 'fbb: 'a> {{\n", builder_name));
        output.push_str("    fbb: &'a mut fb::FlatBufferBuilder<'fbb>,\n");
        output.push_str("    start: fb::UOffset,\n");
        output.push_str("}\n\n");

        output.push_str(&format!("impl<'a, 'fbb: 'a> {}<'a, 'fbb> {{\n", builder_name));
        output.push_str(&format!("    /// Opens a {} table on the builder.\n", name));
        output.push_str("    #[must_use]\n");
        output.push_str(
            "    pub fn new(fbb: &'a mut fb::FlatBufferBuilder<'fbb>) -> Self {\n",
        );
        output.push_str("        let start = fbb.start_table();\n");
        output.push_str("        Self { fbb, start }\n");
        output.push_str("    }\n\n");

        for field in table.live_fields() {
            output.push_str(&self.generate_field_adder(&mapper, field));
        }

        output.push_str("    /// Closes the table and returns its offset.\n");
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn finish(self) -> fb::Offset<{}<'fbb>> {{\n",
            name
        ));
        for field in table.live_fields().filter(|f| f.required) {
            output.push_str(&format!("        // required: {}\n", field.name));
        }
        output.push_str(&format!(
            "        fb::Offset::new(self.fbb.end_table(self.start, {}))\n",
            table.fields.len()
        ));
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }

    /// Generates an `add_<field>` method.
    fn generate_field_adder(&self, mapper: &TypeMapper<'_>, field: &TableField) -> String {
        let mut output = String::new();
        let slot = field.layout.slot;
        let param = field_ident(&field.name);

        let (param_type, call) = match &field.ty {
            SchemaType::Scalar(kind) => (
                mapper.get_type(&field.ty, "", "", "", true),
                format!(
                    "self.fbb.add_scalar::<{}>({}, {}, {});",
                    kind.rust_type(),
                    slot,
                    param,
                    self.default_value(field)
                ),
            ),
            SchemaType::Enum { underlying, .. } => (
                mapper.get_type(&field.ty, "", "", "", true),
                format!(
                    "self.fbb.add_scalar::<{}>({}, {}, {});",
                    underlying.rust_type(),
                    slot,
                    mapper.underlying_cast(&field.ty, Cast::ToWire, &param),
                    self.default_value(field)
                ),
            ),
            SchemaType::Struct(_) => (
                mapper.wire_type(&field.ty, ""),
                format!(
                    "self.fbb.add_struct::<{}>({}, {});",
                    mapper.pointer_type(&field.ty),
                    slot,
                    param
                ),
            ),
            _ => (
                mapper.wire_type(&field.ty, ""),
                format!("self.fbb.add_offset({}, {});", slot, param),
            ),
        };

        output.push_str(&format!("    /// Sets field: {}.\n", field.name));
        output.push_str("    #[inline]\n");
        output.push_str(&format!(
            "    pub fn add_{}(&mut self, {}: {}) {{\n",
            param.trim_start_matches("r#"),
            param,
            param_type
        ));
        output.push_str(&format!("        {}\n", call));
        output.push_str("    }\n\n");

        output
    }
}
