//! Enum code generation.

use crate::rust::types::{TypeMapper, field_ident};
use flatgen_schema::types::EnumDef;

/// Generator for enum definitions.
pub struct EnumGenerator<'a> {
    mapper: &'a TypeMapper<'a>,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(mapper: &'a TypeMapper<'a>) -> Self {
        Self { mapper }
    }

    /// Generates the declaration, name lookup and integer conversion of an
    /// enum.
    #[must_use]
    pub fn generate(&self, enum_def: &EnumDef) -> String {
        let mut output = String::new();
        output.push_str(&self.generate_declaration(enum_def));
        output.push_str(&self.generate_impl(enum_def));
        output.push_str(&self.generate_from_primitive(enum_def));
        output
    }

    /// Generates the enum declaration.
    fn generate_declaration(&self, enum_def: &EnumDef) -> String {
        let mut output = String::new();
        let name = &enum_def.name;

        output.push_str(&format!("/// {} enum.\n", name));
        output.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
        // A zero-variant enum cannot carry a primitive representation.
        if !enum_def.values.is_empty() {
            output.push_str(&format!(
                "#[repr({})]\n",
                self.mapper.basic_type(enum_def.underlying, None, false)
            ));
        }
        output.push_str(&format!("pub enum {} {{\n", name));
        for value in &enum_def.values {
            output.push_str(&format!(
                "    {} = {},\n",
                field_ident(&value.name),
                value.value
            ));
        }
        output.push_str("}\n\n");

        output
    }

    /// Generates `VALUES` and `name()`.
    fn generate_impl(&self, enum_def: &EnumDef) -> String {
        let mut output = String::new();
        let variants: Vec<String> = enum_def
            .values
            .iter()
            .map(|v| format!("Self::{}", field_ident(&v.name)))
            .collect();

        output.push_str(&format!("impl {} {{\n", enum_def.name));
        output.push_str("    /// All declared values, in declaration order.\n");
        output.push_str(&format!(
            "    pub const VALUES: [Self; {}] = [{}];\n\n",
            variants.len(),
            variants.join(", ")
        ));

        output.push_str("    /// Returns the declared name of the value.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn name(&self) -> &'static str {\n");
        output.push_str("        match *self {\n");
        for value in &enum_def.values {
            output.push_str(&format!(
                "            Self::{} => \"{}\",\n",
                field_ident(&value.name),
                value.name
            ));
        }
        output.push_str("        }\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }

    /// Generates the `FromPrimitive` conversion; undeclared values map to
    /// `None`.
    fn generate_from_primitive(&self, enum_def: &EnumDef) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "impl fb::num_traits::FromPrimitive for {} {{\n",
            enum_def.name
        ));
        output.push_str("    fn from_i64(n: i64) -> Option<Self> {\n");
        output.push_str("        match n {\n");
        for value in &enum_def.values {
            output.push_str(&format!(
                "            {} => Some(Self::{}),\n",
                value.value,
                field_ident(&value.name)
            ));
        }
        output.push_str("            _ => None,\n");
        output.push_str("        }\n");
        output.push_str("    }\n\n");

        output.push_str("    fn from_u64(n: u64) -> Option<Self> {\n");
        output.push_str(
            "        i64::try_from(n)\n            .ok()\n            .and_then(<Self as fb::num_traits::FromPrimitive>::from_i64)\n",
        );
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}
