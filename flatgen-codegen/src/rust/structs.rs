//! Fixed-layout struct code generation.
//!
//! Structs are emitted as `#[repr(C, packed)]` records whose fields hold
//! little-endian data, with explicit filler fields reproducing the padding
//! computed upstream. Fields stay private; values go in through `new` and
//! come out through accessors that undo the wire conversion.

use crate::options::GeneratorOptions;
use crate::rust::types::{Cast, TypeMapper, field_ident};
use flatgen_schema::definitions::{StructDef, StructField};
use flatgen_schema::types::{ScalarKind, SchemaType};

/// Generator for fixed-layout structs.
pub struct StructGenerator<'a> {
    mapper: &'a TypeMapper<'a>,
    options: &'a GeneratorOptions,
}

impl<'a> StructGenerator<'a> {
    /// Creates a new struct generator.
    #[must_use]
    pub fn new(mapper: &'a TypeMapper<'a>, options: &'a GeneratorOptions) -> Self {
        Self { mapper, options }
    }

    /// Generates the record, its layout checks, constructor and accessors.
    #[must_use]
    pub fn generate(&self, struct_def: &StructDef) -> String {
        let mut output = String::new();
        output.push_str(&self.generate_record(struct_def));
        output.push_str(&self.generate_layout(struct_def));
        output.push_str(&self.generate_impl(struct_def));
        output.push_str(&self.generate_debug(struct_def));
        output
    }

    /// Type of a field as stored in the record.
    fn storage_type(&self, field: &StructField) -> String {
        match &field.ty {
            SchemaType::Scalar(ScalarKind::Bool) => "u8".to_string(),
            ty => self.mapper.get_type(ty, "", "", "", false),
        }
    }

    /// Generates the packed record with its filler fields.
    fn generate_record(&self, struct_def: &StructDef) -> String {
        let mut output = String::new();
        let mut padding_id = 0;

        output.push_str(&format!("/// {} struct.\n", struct_def.name));
        output.push_str(
            "#[derive(Clone, Copy, PartialEq, fb::bytemuck::Pod, fb::bytemuck::Zeroable)]\n",
        );
        output.push_str(&format!(
            "#[bytemuck(crate = \"{}::bytemuck\")]\n",
            self.options.runtime_crate_path()
        ));
        output.push_str("#[repr(C, packed)]\n");
        output.push_str(&format!("pub struct {} {{\n", struct_def.name));
        for field in &struct_def.fields {
            output.push_str(&format!(
                "    {}: {},\n",
                field_ident(&field.name),
                self.storage_type(field)
            ));
            for filler in &field.layout.padding {
                output.push_str(&format!(
                    "    __padding{}: {},\n",
                    padding_id,
                    filler.size.rust_type()
                ));
                padding_id += 1;
            }
        }
        output.push_str("}\n\n");

        output
    }

    /// Generates the size assertion and the `fb::Struct` implementation.
    fn generate_layout(&self, struct_def: &StructDef) -> String {
        let mut output = String::new();
        let name = &struct_def.name;

        if self.options.emits_layout_assertions() {
            output.push_str(&format!(
                "const _: () = assert!(::core::mem::size_of::<{}>() == {});\n\n",
                name, struct_def.byte_size
            ));
        }

        output.push_str(&format!("impl fb::Struct for {} {{\n", name));
        output.push_str(&format!(
            "    const ALIGN: usize = {};\n",
            struct_def.min_align
        ));
        output.push_str("}\n\n");

        output
    }

    /// Generates `new` and the field accessors.
    fn generate_impl(&self, struct_def: &StructDef) -> String {
        let mut output = String::new();

        output.push_str(&format!("impl {} {{\n", struct_def.name));
        output.push_str(&self.generate_constructor(struct_def));
        for field in &struct_def.fields {
            output.push_str(&self.generate_accessor(field));
        }
        output.push_str("}\n\n");

        output
    }

    fn generate_constructor(&self, struct_def: &StructDef) -> String {
        let mut output = String::new();
        let params: Vec<String> = struct_def
            .fields
            .iter()
            .map(|field| {
                format!(
                    "{}: {}",
                    field_ident(&field.name),
                    self.mapper.get_type(&field.ty, "", "&", "", true)
                )
            })
            .collect();

        output.push_str(&format!(
            "    /// Creates a {} from its field values.\n",
            struct_def.name
        ));
        if params.len() > 7 {
            output.push_str("    #[allow(clippy::too_many_arguments)]\n");
        }
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn new({}) -> Self {{\n",
            params.join(", ")
        ));
        output.push_str("        Self {\n");

        let mut padding_id = 0;
        for field in &struct_def.fields {
            let ident = field_ident(&field.name);
            let value = if field.ty.is_scalar() {
                format!(
                    "fb::Endian::to_le({})",
                    self.mapper.underlying_cast(&field.ty, Cast::ToWire, &ident)
                )
            } else {
                format!("*{}", ident)
            };
            output.push_str(&format!("            {}: {},\n", ident, value));
            for _ in &field.layout.padding {
                output.push_str(&format!("            __padding{}: 0,\n", padding_id));
                padding_id += 1;
            }
        }

        output.push_str("        }\n");
        output.push_str("    }\n\n");

        output
    }

    fn generate_accessor(&self, field: &StructField) -> String {
        let mut output = String::new();
        let ident = field_ident(&field.name);
        let method = accessor_name(&field.name);

        let (return_type, body) = if field.ty.is_scalar() {
            let stored = format!("fb::Endian::from_le(self.{})", ident);
            let value = self.mapper.underlying_cast(&field.ty, Cast::FromWire, &stored);
            let ty = self.mapper.get_type(&field.ty, "", "", "", true);
            if field.ty.is_enum() {
                (format!("Option<{}>", ty), value)
            } else {
                (ty, value)
            }
        } else {
            (
                self.mapper.get_type(&field.ty, "", "&", "", true),
                format!("&self.{}", ident),
            )
        };

        output.push_str(&format!("    /// Field: {}.\n", field.name));
        output.push_str("    #[inline]\n");
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn {}(&self) -> {} {{\n",
            method, return_type
        ));
        output.push_str(&format!("        {}\n", body));
        output.push_str("    }\n\n");

        output
    }

    /// Generates a `Debug` implementation that shows decoded field values.
    fn generate_debug(&self, struct_def: &StructDef) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "impl ::core::fmt::Debug for {} {{\n",
            struct_def.name
        ));
        output.push_str(
            "    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {\n",
        );
        output.push_str(&format!("        f.debug_struct(\"{}\")\n", struct_def.name));
        for field in &struct_def.fields {
            output.push_str(&format!(
                "            .field(\"{}\", &self.{}())\n",
                field.name,
                accessor_name(&field.name)
            ));
        }
        output.push_str("            .finish()\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}

/// Returns the accessor method name of a struct field.
///
/// A field called `new` would clash with the constructor, so its accessor
/// gets a trailing underscore.
fn accessor_name(name: &str) -> String {
    match field_ident(name) {
        ident if ident == "new" => "new_".to_string(),
        ident => ident,
    }
}
