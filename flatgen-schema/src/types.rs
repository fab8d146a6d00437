//! Schema type descriptors.
//!
//! This module contains the closed set of field types a schema can use:
//! scalar kinds, references to enums/structs/tables/unions, strings and
//! vectors, plus the namespace paths used to qualify references.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar kinds supported by the wire format.
///
/// Serialized as the IDL keyword; the sized aliases (`int32`, `uint8`, ...)
/// are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ScalarKind {
    /// Boolean stored as a single byte.
    Bool,
    /// Signed 8-bit integer.
    Byte,
    /// Unsigned 8-bit integer.
    UByte,
    /// Signed 16-bit integer.
    Short,
    /// Unsigned 16-bit integer.
    UShort,
    /// Signed 32-bit integer.
    Int,
    /// Unsigned 32-bit integer.
    UInt,
    /// Signed 64-bit integer.
    Long,
    /// Unsigned 64-bit integer.
    ULong,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// Union discriminant (unsigned 8-bit).
    UType,
}

impl ScalarKind {
    /// Returns the size of the scalar in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Bool | Self::Byte | Self::UByte | Self::UType => 1,
            Self::Short | Self::UShort => 2,
            Self::Int | Self::UInt | Self::Float => 4,
            Self::Long | Self::ULong | Self::Double => 8,
        }
    }

    /// Returns the Rust primitive type name for this scalar.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Byte => "i8",
            Self::UByte => "u8",
            Self::Short => "i16",
            Self::UShort => "u16",
            Self::Int => "i32",
            Self::UInt => "u32",
            Self::Long => "i64",
            Self::ULong => "u64",
            Self::Float => "f32",
            Self::Double => "f64",
            Self::UType => "u8",
        }
    }

    /// Returns the IDL keyword for this scalar.
    #[must_use]
    pub const fn idl_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::UByte => "ubyte",
            Self::Short => "short",
            Self::UShort => "ushort",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Long => "long",
            Self::ULong => "ulong",
            Self::Float => "float",
            Self::Double => "double",
            Self::UType => "utype",
        }
    }

    /// Parses a scalar kind from its IDL keyword, including the sized aliases.
    #[must_use]
    pub fn from_idl_name(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Self::Bool),
            "byte" | "int8" => Some(Self::Byte),
            "ubyte" | "uint8" => Some(Self::UByte),
            "short" | "int16" => Some(Self::Short),
            "ushort" | "uint16" => Some(Self::UShort),
            "int" | "int32" => Some(Self::Int),
            "uint" | "uint32" => Some(Self::UInt),
            "long" | "int64" => Some(Self::Long),
            "ulong" | "uint64" => Some(Self::ULong),
            "float" | "float32" => Some(Self::Float),
            "double" | "float64" => Some(Self::Double),
            "utype" => Some(Self::UType),
            _ => None,
        }
    }

    /// Returns true for integer kinds (the only kinds an enum may use).
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        !matches!(self, Self::Bool | Self::Float | Self::Double)
    }

    /// Returns true for floating point kinds.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }
}

impl TryFrom<String> for ScalarKind {
    type Error = SchemaError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_idl_name(&name).ok_or(SchemaError::UnknownScalar { name })
    }
}

impl From<ScalarKind> for &'static str {
    fn from(kind: ScalarKind) -> Self {
        kind.idl_name()
    }
}

/// Namespace path of a definition, outermost component first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace {
    /// Path components.
    pub components: Vec<String>,
}

impl Namespace {
    /// Creates a namespace from its components.
    #[must_use]
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a dotted namespace such as `MyGame.Sample`.
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        Self::new(dotted.split('.').filter(|c| !c.is_empty()))
    }

    /// Returns true for the global namespace.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

/// Reference to a named definition together with its declaring namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Declaring namespace.
    #[serde(default)]
    pub namespace: Namespace,
    /// Unqualified definition name.
    pub name: String,
}

impl QualifiedName {
    /// Creates a qualified name.
    #[must_use]
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_root() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace, self.name)
        }
    }
}

/// Type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// Plain scalar.
    Scalar(ScalarKind),
    /// Enum stored as its underlying scalar.
    Enum {
        /// Enum definition.
        def: QualifiedName,
        /// Underlying scalar kind.
        underlying: ScalarKind,
    },
    /// Fixed-layout struct, stored inline.
    Struct(QualifiedName),
    /// Table, stored behind an offset.
    Table(QualifiedName),
    /// UTF-8 string, stored behind an offset.
    String,
    /// Vector of elements, stored behind an offset.
    Vector(Box<SchemaType>),
    /// Union value (generation not supported beyond a placeholder).
    Union(QualifiedName),
}

impl SchemaType {
    /// Creates a vector type.
    #[must_use]
    pub fn vector_of(element: SchemaType) -> Self {
        Self::Vector(Box::new(element))
    }

    /// Returns the scalar kind stored on the wire for scalars and enums.
    #[must_use]
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(kind) => Some(*kind),
            Self::Enum { underlying, .. } => Some(*underlying),
            _ => None,
        }
    }

    /// Returns true for scalars and enums.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.scalar_kind().is_some()
    }

    /// Returns true for boolean scalars.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Scalar(ScalarKind::Bool))
    }

    /// Returns true for enum-typed fields.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum { .. })
    }

    /// Returns true for fixed-layout structs.
    #[must_use]
    pub fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }

    /// Returns the enum definition for enum-typed fields.
    #[must_use]
    pub fn enum_def(&self) -> Option<&QualifiedName> {
        match self {
            Self::Enum { def, .. } => Some(def),
            _ => None,
        }
    }
}

/// A named value of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumVal {
    /// Value name.
    pub name: String,
    /// Integer value.
    pub value: i64,
}

impl EnumVal {
    /// Creates an enum value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Enum definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    /// Enum name.
    pub name: String,
    /// Declaring namespace.
    #[serde(default)]
    pub namespace: Namespace,
    /// Underlying scalar kind.
    pub underlying: ScalarKind,
    /// Declared values, in declaration order.
    pub values: Vec<EnumVal>,
}

impl EnumDef {
    /// Creates an enum definition without values.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: Namespace, underlying: ScalarKind) -> Self {
        Self {
            name: name.into(),
            namespace,
            underlying,
            values: Vec::new(),
        }
    }

    /// Adds a value, builder style.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.values.push(EnumVal::new(name, value));
        self
    }

    /// Returns the qualified name of this enum.
    #[must_use]
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(self.namespace.clone(), self.name.clone())
    }

    /// Returns the field type referring to this enum.
    #[must_use]
    pub fn as_type(&self) -> SchemaType {
        SchemaType::Enum {
            def: self.qualified_name(),
            underlying: self.underlying,
        }
    }

    /// Looks up a value by name.
    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&EnumVal> {
        self.values.iter().find(|v| v.name == name)
    }

    /// Looks up a value by its integer.
    #[must_use]
    pub fn reverse_lookup(&self, value: i64) -> Option<&EnumVal> {
        self.values.iter().find(|v| v.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_kind_size() {
        assert_eq!(ScalarKind::Bool.size(), 1);
        assert_eq!(ScalarKind::Short.size(), 2);
        assert_eq!(ScalarKind::Float.size(), 4);
        assert_eq!(ScalarKind::ULong.size(), 8);
    }

    #[test]
    fn test_scalar_kind_rust_type() {
        assert_eq!(ScalarKind::Bool.rust_type(), "bool");
        assert_eq!(ScalarKind::Byte.rust_type(), "i8");
        assert_eq!(ScalarKind::UType.rust_type(), "u8");
        assert_eq!(ScalarKind::Double.rust_type(), "f64");
    }

    #[test]
    fn test_scalar_kind_from_idl_name() {
        assert_eq!(ScalarKind::from_idl_name("int"), Some(ScalarKind::Int));
        assert_eq!(ScalarKind::from_idl_name("uint16"), Some(ScalarKind::UShort));
        assert_eq!(ScalarKind::from_idl_name("string"), None);
        for kind in [ScalarKind::Bool, ScalarKind::Long, ScalarKind::Float] {
            assert_eq!(ScalarKind::from_idl_name(kind.idl_name()), Some(kind));
        }
    }

    #[test]
    fn test_scalar_kind_is_integer() {
        assert!(ScalarKind::Byte.is_integer());
        assert!(ScalarKind::ULong.is_integer());
        assert!(!ScalarKind::Bool.is_integer());
        assert!(!ScalarKind::Double.is_integer());
    }

    #[test]
    fn test_scalar_kind_is_float() {
        assert!(ScalarKind::Float.is_float());
        assert!(ScalarKind::Double.is_float());
        assert!(!ScalarKind::Int.is_float());
        assert!(!ScalarKind::Bool.is_float());
    }

    #[test]
    fn test_scalar_kind_serde_uses_idl_names() {
        let kind: ScalarKind = serde_json::from_str(r#""uint16""#).unwrap();
        assert_eq!(kind, ScalarKind::UShort);
        let kind: ScalarKind = serde_json::from_str(r#""utype""#).unwrap();
        assert_eq!(kind, ScalarKind::UType);
        assert_eq!(serde_json::to_string(&ScalarKind::UByte).unwrap(), r#""ubyte""#);

        let err = serde_json::from_str::<ScalarKind>(r#""int128""#).unwrap_err();
        assert!(err.to_string().contains("unknown scalar type 'int128'"));
    }

    #[test]
    fn test_namespace_parse_and_display() {
        let ns = Namespace::parse("MyGame.Sample");
        assert_eq!(ns.components, vec!["MyGame", "Sample"]);
        assert_eq!(ns.to_string(), "MyGame.Sample");
        assert!(Namespace::parse("").is_root());
    }

    #[test]
    fn test_qualified_name_display() {
        let name = QualifiedName::new(Namespace::parse("A.B"), "Monster");
        assert_eq!(name.to_string(), "A.B.Monster");
        let global = QualifiedName::new(Namespace::default(), "Monster");
        assert_eq!(global.to_string(), "Monster");
    }

    #[test]
    fn test_schema_type_predicates() {
        let color = EnumDef::new("Color", Namespace::default(), ScalarKind::Byte).as_type();
        assert!(color.is_scalar());
        assert!(color.is_enum());
        assert_eq!(color.scalar_kind(), Some(ScalarKind::Byte));

        let flag = SchemaType::Scalar(ScalarKind::Bool);
        assert!(flag.is_bool());
        assert!(!flag.is_enum());

        let names = SchemaType::vector_of(SchemaType::String);
        assert!(!names.is_scalar());
        assert_eq!(names.scalar_kind(), None);
    }

    #[test]
    fn test_enum_def_lookup() {
        let color = EnumDef::new("Color", Namespace::default(), ScalarKind::Byte)
            .with_value("Red", 0)
            .with_value("Green", 1);

        assert_eq!(color.get_value("Green").map(|v| v.value), Some(1));
        assert_eq!(color.reverse_lookup(0).map(|v| v.name.as_str()), Some("Red"));
        assert!(color.reverse_lookup(7).is_none());
    }

    #[test]
    fn test_schema_type_json_shape() {
        let ty: SchemaType = serde_json::from_str(r#"{"scalar":"ushort"}"#).unwrap();
        assert_eq!(ty, SchemaType::Scalar(ScalarKind::UShort));

        let ty: SchemaType = serde_json::from_str(r#""string""#).unwrap();
        assert_eq!(ty, SchemaType::String);

        let ty: SchemaType =
            serde_json::from_str(r#"{"vector":{"table":{"namespace":["G"],"name":"Weapon"}}}"#)
                .unwrap();
        assert_eq!(
            ty,
            SchemaType::vector_of(SchemaType::Table(QualifiedName::new(
                Namespace::parse("G"),
                "Weapon"
            )))
        );

        assert!(serde_json::from_str::<SchemaType>(r#"{"scalar":"int128"}"#).is_err());
    }
}
