//! Mapping from schema types to Rust type expressions.
//!
//! Every generator consults a [`TypeMapper`] for field types. It knows the
//! namespace being generated, so references to definitions declared
//! elsewhere come out fully qualified.

use crate::options::GeneratorOptions;
use flatgen_schema::types::{Namespace, QualifiedName, ScalarKind, SchemaType};

/// Direction of an underlying-representation conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cast {
    /// Logical value to stored representation.
    ToWire,
    /// Stored representation to logical value.
    FromWire,
}

/// Converts schema types into Rust type expressions.
pub struct TypeMapper<'a> {
    namespace: &'a Namespace,
    options: &'a GeneratorOptions,
    lifetime: &'a str,
}

impl<'a> TypeMapper<'a> {
    /// Creates a mapper for code generated into `namespace`, using the
    /// `'a` lifetime for buffer views.
    #[must_use]
    pub fn new(namespace: &'a Namespace, options: &'a GeneratorOptions) -> Self {
        Self {
            namespace,
            options,
            lifetime: "'a",
        }
    }

    /// Returns a mapper that uses `lifetime` for buffer views.
    #[must_use]
    pub fn with_lifetime(&self, lifetime: &'a str) -> Self {
        Self {
            namespace: self.namespace,
            options: self.options,
            lifetime,
        }
    }

    /// Returns the name to use for `name` from the active namespace.
    ///
    /// Definitions declared in another namespace are prefixed with the
    /// namespace root and their module path.
    #[must_use]
    pub fn qualify(&self, name: &QualifiedName) -> String {
        if &name.namespace == self.namespace {
            return name.name.clone();
        }

        let mut path = self.options.namespace_root_path().to_string();
        for component in &name.namespace.components {
            path.push_str("::");
            path.push_str(component);
        }
        format!("{}::{}", path, name.name)
    }

    /// Returns the Rust type of a scalar, or the enum type when
    /// `want_enum` is set and the field is enum-typed.
    #[must_use]
    pub fn basic_type(
        &self,
        kind: ScalarKind,
        enum_def: Option<&QualifiedName>,
        want_enum: bool,
    ) -> String {
        match enum_def {
            Some(def) if want_enum => self.qualify(def),
            _ => kind.rust_type().to_string(),
        }
    }

    /// Returns the type used to hand a value to the builder.
    ///
    /// Scalars map to their stored type, structs to a reference and
    /// everything else to an offset.
    #[must_use]
    pub fn wire_type(&self, ty: &SchemaType, suffix: &str) -> String {
        match ty {
            SchemaType::Scalar(kind) | SchemaType::Enum { underlying: kind, .. } => {
                format!("{}{}", self.basic_type(*kind, None, false), suffix)
            }
            SchemaType::Struct(_) => format!("&{}{}", self.pointer_type(ty), suffix),
            _ => format!("fb::Offset<{}>{}", self.pointer_type(ty), suffix),
        }
    }

    /// Returns the view type of a value reached through the buffer.
    #[must_use]
    pub fn pointer_type(&self, ty: &SchemaType) -> String {
        let lt = self.lifetime;
        match ty {
            SchemaType::Scalar(kind) | SchemaType::Enum { underlying: kind, .. } => {
                self.basic_type(*kind, None, false)
            }
            SchemaType::String => format!("fb::String<{lt}>"),
            SchemaType::Vector(element) => {
                let stored = self.element_type(element);
                if element.is_scalar() || element.is_struct() {
                    format!("fb::Vector<{lt}, {stored}>")
                } else {
                    format!(
                        "fb::Vector<{lt}, {stored}, {}>",
                        self.pointer_type(element)
                    )
                }
            }
            SchemaType::Struct(name) => self.qualify(name),
            SchemaType::Table(name) => format!("{}<{lt}>", self.qualify(name)),
            SchemaType::Union(_) => "()".to_string(),
        }
    }

    /// Returns the type of a field as seen by accessors and constructors.
    #[must_use]
    pub fn get_type(
        &self,
        ty: &SchemaType,
        after_basic: &str,
        before_ptr: &str,
        after_ptr: &str,
        want_enum: bool,
    ) -> String {
        match ty {
            SchemaType::Scalar(ScalarKind::Bool) => "bool".to_string(),
            SchemaType::Scalar(kind) => {
                format!("{}{}", self.basic_type(*kind, None, want_enum), after_basic)
            }
            SchemaType::Enum { def, underlying } => format!(
                "{}{}",
                self.basic_type(*underlying, Some(def), want_enum),
                after_basic
            ),
            _ => format!("{}{}{}", before_ptr, self.pointer_type(ty), after_ptr),
        }
    }

    /// Converts a value between its logical type and the stored
    /// representation: enums go through their underlying integer and bools
    /// through a `u8`. Other types pass through unchanged.
    #[must_use]
    pub fn underlying_cast(&self, ty: &SchemaType, cast: Cast, expr: &str) -> String {
        match (ty, cast) {
            (SchemaType::Enum { underlying, .. }, Cast::ToWire) => {
                format!("{} as {}", expr, underlying.rust_type())
            }
            (SchemaType::Enum { def, underlying }, Cast::FromWire) => {
                let (method, int) = if is_unsigned(*underlying) {
                    ("from_u64", "u64")
                } else {
                    ("from_i64", "i64")
                };
                format!(
                    "<{} as fb::num_traits::FromPrimitive>::{}({} as {})",
                    self.qualify(def),
                    method,
                    expr,
                    int
                )
            }
            (SchemaType::Scalar(ScalarKind::Bool), Cast::ToWire) => {
                format!("if {expr} {{ 1u8 }} else {{ 0u8 }}")
            }
            (SchemaType::Scalar(ScalarKind::Bool), Cast::FromWire) => format!("{expr} != 0"),
            _ => expr.to_string(),
        }
    }
}

fn is_unsigned(kind: ScalarKind) -> bool {
    matches!(
        kind,
        ScalarKind::UByte
            | ScalarKind::UShort
            | ScalarKind::UInt
            | ScalarKind::ULong
            | ScalarKind::UType
    )
}

impl TypeMapper<'_> {
    /// Stored element type of a vector.
    fn element_type(&self, element: &SchemaType) -> String {
        match element {
            SchemaType::Scalar(ScalarKind::Bool) => "bool".to_string(),
            SchemaType::Struct(_) => format!("&{} {}", self.lifetime, self.pointer_type(element)),
            _ => self.wire_type(element, ""),
        }
    }
}

/// Renders a declared default as a literal of the field's Rust type.
///
/// Missing defaults are zero. Float defaults always carry a decimal point
/// and the IDL spellings of NaN and infinity map to the matching constants.
#[must_use]
pub fn default_literal(kind: ScalarKind, constant: Option<&str>) -> String {
    let constant = constant.map(str::trim).filter(|c| !c.is_empty());
    match kind {
        ScalarKind::Bool => match constant {
            None | Some("0") | Some("false") => "false".to_string(),
            Some(_) => "true".to_string(),
        },
        kind if kind.is_float() => {
            let ty = kind.rust_type();
            match constant {
                None => "0.0".to_string(),
                Some("nan" | "+nan" | "-nan") => format!("{ty}::NAN"),
                Some("inf" | "+inf" | "infinity" | "+infinity") => format!("{ty}::INFINITY"),
                Some("-inf" | "-infinity") => format!("{ty}::NEG_INFINITY"),
                Some(c) if c.contains(['.', 'e', 'E']) => c.to_string(),
                Some(c) => format!("{c}.0"),
            }
        }
        _ => constant.unwrap_or("0").to_string(),
    }
}

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Path keywords that cannot be raw identifiers.
const PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Returns `name` as a valid Rust identifier.
#[must_use]
pub fn field_ident(name: &str) -> String {
    if PATH_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Namespace {
        Namespace::parse("Game")
    }

    fn color(ns: Namespace) -> SchemaType {
        SchemaType::Enum {
            def: QualifiedName::new(ns, "Color"),
            underlying: ScalarKind::Byte,
        }
    }

    #[test]
    fn test_basic_type() {
        let ns = game();
        let options = GeneratorOptions::default();
        let mapper = TypeMapper::new(&ns, &options);
        let def = QualifiedName::new(game(), "Color");

        assert_eq!(mapper.basic_type(ScalarKind::UShort, None, true), "u16");
        assert_eq!(mapper.basic_type(ScalarKind::Byte, Some(&def), false), "i8");
        assert_eq!(mapper.basic_type(ScalarKind::Byte, Some(&def), true), "Color");
    }

    #[test]
    fn test_qualify_across_namespaces() {
        let ns = game();
        let options = GeneratorOptions::default();
        let mapper = TypeMapper::new(&ns, &options);

        let local = QualifiedName::new(game(), "Vec3");
        let other = QualifiedName::new(Namespace::parse("Shared.Math"), "Vec3");
        let global = QualifiedName::new(Namespace::default(), "Vec3");

        assert_eq!(mapper.qualify(&local), "Vec3");
        assert_eq!(mapper.qualify(&other), "crate::Shared::Math::Vec3");
        assert_eq!(mapper.qualify(&global), "crate::Vec3");

        let options = GeneratorOptions::new().namespace_root("crate::schema");
        let mapper = TypeMapper::new(&ns, &options);
        assert_eq!(mapper.qualify(&other), "crate::schema::Shared::Math::Vec3");
    }

    #[test]
    fn test_wire_type() {
        let ns = game();
        let options = GeneratorOptions::default();
        let mapper = TypeMapper::new(&ns, &options).with_lifetime("'fbb");

        assert_eq!(mapper.wire_type(&SchemaType::Scalar(ScalarKind::Int), ""), "i32");
        assert_eq!(mapper.wire_type(&color(game()), ""), "i8");
        assert_eq!(
            mapper.wire_type(&SchemaType::Struct(QualifiedName::new(game(), "Vec3")), ""),
            "&Vec3"
        );
        assert_eq!(
            mapper.wire_type(&SchemaType::String, ""),
            "fb::Offset<fb::String<'fbb>>"
        );
        assert_eq!(
            mapper.wire_type(&SchemaType::Table(QualifiedName::new(game(), "Weapon")), " "),
            "fb::Offset<Weapon<'fbb>> "
        );
    }

    #[test]
    fn test_pointer_type_vectors() {
        let ns = game();
        let options = GeneratorOptions::default();
        let mapper = TypeMapper::new(&ns, &options);
        let vec3 = SchemaType::Struct(QualifiedName::new(game(), "Vec3"));
        let weapon = SchemaType::Table(QualifiedName::new(game(), "Weapon"));

        assert_eq!(
            mapper.pointer_type(&SchemaType::vector_of(SchemaType::Scalar(ScalarKind::UByte))),
            "fb::Vector<'a, u8>"
        );
        assert_eq!(
            mapper.pointer_type(&SchemaType::vector_of(SchemaType::Scalar(ScalarKind::Bool))),
            "fb::Vector<'a, bool>"
        );
        assert_eq!(
            mapper.pointer_type(&SchemaType::vector_of(color(game()))),
            "fb::Vector<'a, i8>"
        );
        assert_eq!(
            mapper.pointer_type(&SchemaType::vector_of(vec3)),
            "fb::Vector<'a, &'a Vec3>"
        );
        assert_eq!(
            mapper.pointer_type(&SchemaType::vector_of(weapon)),
            "fb::Vector<'a, fb::Offset<Weapon<'a>>, Weapon<'a>>"
        );
        assert_eq!(
            mapper.pointer_type(&SchemaType::vector_of(SchemaType::String)),
            "fb::Vector<'a, fb::Offset<fb::String<'a>>, fb::String<'a>>"
        );
        assert_eq!(
            mapper.pointer_type(&SchemaType::Union(QualifiedName::new(game(), "Equipment"))),
            "()"
        );
    }

    #[test]
    fn test_get_type() {
        let ns = game();
        let options = GeneratorOptions::default();
        let mapper = TypeMapper::new(&ns, &options);

        assert_eq!(
            mapper.get_type(&SchemaType::Scalar(ScalarKind::Bool), "X", "", "", true),
            "bool"
        );
        assert_eq!(
            mapper.get_type(&SchemaType::Scalar(ScalarKind::Float), "", "", "", true),
            "f32"
        );
        assert_eq!(mapper.get_type(&color(game()), "", "", "", true), "Color");
        assert_eq!(mapper.get_type(&color(game()), "", "", "", false), "i8");
        assert_eq!(
            mapper.get_type(&SchemaType::String, "", "Option<", ">", true),
            "Option<fb::String<'a>>"
        );
        assert_eq!(
            mapper.get_type(
                &SchemaType::Struct(QualifiedName::new(game(), "Vec3")),
                "",
                "&",
                "",
                true
            ),
            "&Vec3"
        );
    }

    #[test]
    fn test_underlying_cast() {
        let ns = game();
        let options = GeneratorOptions::default();
        let mapper = TypeMapper::new(&ns, &options);
        let flag = SchemaType::Scalar(ScalarKind::Bool);
        let level = SchemaType::Enum {
            def: QualifiedName::new(game(), "Level"),
            underlying: ScalarKind::UShort,
        };

        assert_eq!(mapper.underlying_cast(&color(game()), Cast::ToWire, "c"), "c as i8");
        assert_eq!(
            mapper.underlying_cast(&color(game()), Cast::FromWire, "v"),
            "<Color as fb::num_traits::FromPrimitive>::from_i64(v as i64)"
        );
        assert_eq!(
            mapper.underlying_cast(&level, Cast::FromWire, "v"),
            "<Level as fb::num_traits::FromPrimitive>::from_u64(v as u64)"
        );
        assert_eq!(
            mapper.underlying_cast(&flag, Cast::ToWire, "b"),
            "if b { 1u8 } else { 0u8 }"
        );
        assert_eq!(mapper.underlying_cast(&flag, Cast::FromWire, "b"), "b != 0");
        assert_eq!(
            mapper.underlying_cast(&SchemaType::Scalar(ScalarKind::Int), Cast::ToWire, "x"),
            "x"
        );
    }

    #[test]
    fn test_default_literal() {
        assert_eq!(default_literal(ScalarKind::Int, Some("5")), "5");
        assert_eq!(default_literal(ScalarKind::Short, None), "0");
        assert_eq!(default_literal(ScalarKind::Float, Some("1")), "1.0");
        assert_eq!(default_literal(ScalarKind::Double, Some("1.5")), "1.5");
        assert_eq!(default_literal(ScalarKind::Double, Some("1e3")), "1e3");
        assert_eq!(default_literal(ScalarKind::Float, None), "0.0");
        assert_eq!(default_literal(ScalarKind::Float, Some("nan")), "f32::NAN");
        assert_eq!(default_literal(ScalarKind::Double, Some("-inf")), "f64::NEG_INFINITY");
        assert_eq!(default_literal(ScalarKind::Bool, Some("1")), "true");
        assert_eq!(default_literal(ScalarKind::Bool, Some("false")), "false");
        assert_eq!(default_literal(ScalarKind::Bool, None), "false");
    }

    #[test]
    fn test_field_ident() {
        assert_eq!(field_ident("hp"), "hp");
        assert_eq!(field_ident("type"), "r#type");
        assert_eq!(field_ident("match"), "r#match");
        assert_eq!(field_ident("self"), "self_");
    }
}
