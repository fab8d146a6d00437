//! Main code generator.

use crate::options::GeneratorOptions;
use crate::rust::{EnumGenerator, StructGenerator, TableGenerator, TypeMapper};
use flatgen_schema::SchemaModel;
use flatgen_schema::types::QualifiedName;
use std::collections::HashSet;

/// Qualified names of the definitions already emitted.
///
/// Owned by the caller and threaded through [`Generator::generate`], so the
/// same set can span several models that share definitions.
#[derive(Debug, Clone, Default)]
pub struct EmittedSet {
    names: HashSet<QualifiedName>,
}

impl EmittedSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name`, returning false if it was already present.
    pub fn insert(&mut self, name: QualifiedName) -> bool {
        self.names.insert(name)
    }

    /// Returns true if `name` has been emitted.
    #[must_use]
    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.names.contains(name)
    }

    /// Forgets every emitted definition.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Returns the number of emitted definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedUnit {
    /// Every definition was already emitted; nothing to write.
    Skip,
    /// Complete source text of the unit.
    Code(String),
}

impl GeneratedUnit {
    /// Returns true for [`GeneratedUnit::Skip`].
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    /// Returns the generated source, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Skip => None,
            Self::Code(code) => Some(code),
        }
    }

    /// Consumes the unit, returning the generated source, if any.
    #[must_use]
    pub fn into_code(self) -> Option<String> {
        match self {
            Self::Skip => None,
            Self::Code(code) => Some(code),
        }
    }
}

/// Code generator for a schema model.
pub struct Generator<'a> {
    model: &'a SchemaModel,
    options: &'a GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for the given model.
    #[must_use]
    pub fn new(model: &'a SchemaModel, options: &'a GeneratorOptions) -> Self {
        Self { model, options }
    }

    /// Generates the unit for every definition not yet in `emitted`.
    ///
    /// Enums come first, then structs and tables in declaration order.
    /// Returns [`GeneratedUnit::Skip`] when nothing was left to emit.
    pub fn generate(&self, emitted: &mut EmittedSet) -> GeneratedUnit {
        let mapper = TypeMapper::new(&self.model.namespace, self.options);
        let mut enum_code = String::new();
        let mut decl_code = String::new();
        // Reserved for code that must follow the enum section.
        let enum_code_post = String::new();

        let enum_gen = EnumGenerator::new(&mapper);
        for enum_def in &self.model.enums {
            let name = enum_def.qualified_name();
            if !emitted.insert(name.clone()) {
                tracing::trace!("Skipping enum {}, already emitted", name);
                continue;
            }
            tracing::debug!("Generating enum {}", name);
            enum_code.push_str(&enum_gen.generate(enum_def));
        }

        let struct_gen = StructGenerator::new(&mapper, self.options);
        for struct_def in &self.model.structs {
            let name = struct_def.qualified_name();
            if !emitted.insert(name.clone()) {
                tracing::trace!("Skipping struct {}, already emitted", name);
                continue;
            }
            tracing::debug!("Generating struct {}", name);
            decl_code.push_str(&struct_gen.generate(struct_def));
        }

        let table_gen = TableGenerator::new(&mapper, self.model);
        for table_def in &self.model.tables {
            let name = table_def.qualified_name();
            if !emitted.insert(name.clone()) {
                tracing::trace!("Skipping table {}, already emitted", name);
                continue;
            }
            tracing::debug!("Generating table {}", name);
            decl_code.push_str(&table_gen.generate(table_def));
        }

        if enum_code.is_empty() && decl_code.is_empty() {
            return GeneratedUnit::Skip;
        }

        let mut output = String::new();
        output.push_str(self.options.header_line());
        output.push_str("\n\n");
        output.push_str(&format!(
            "use {} as fb;\n\n",
            self.options.runtime_crate_path()
        ));
        output.push_str(&enum_code);
        output.push_str(&decl_code);
        output.push_str(&enum_code_post);

        GeneratedUnit::Code(output)
    }
}
