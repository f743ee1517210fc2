//! Type descriptors and their rendering as type expressions.
//!
//! A [`TypeDesc`] mirrors what a reflection API reports about a type:
//! primitives, nullable wrappers, arrays of any rank, generic definitions
//! (open) and constructed generics (closed), and types nested inside other
//! (possibly generic) types. [`TypeNameFormatter`] renders descriptors, and
//! [`TypeNameCache`] memoizes the results across formatters.

mod cache;
mod format;
mod parse;

use std::fmt;

pub use cache::TypeNameCache;
pub use format::{TypeNameFormatter, TypeNameMode};
pub use parse::TypeParseError;

/// Primitive types with a keyword spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Byte,
    SByte,
    Char,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    NInt,
    NUInt,
    Float,
    Double,
    Decimal,
    String,
    Object,
    Void,
}

impl Primitive {
    pub const ALL: [Primitive; 18] = [
        Primitive::Bool,
        Primitive::Byte,
        Primitive::SByte,
        Primitive::Char,
        Primitive::Short,
        Primitive::UShort,
        Primitive::Int,
        Primitive::UInt,
        Primitive::Long,
        Primitive::ULong,
        Primitive::NInt,
        Primitive::NUInt,
        Primitive::Float,
        Primitive::Double,
        Primitive::Decimal,
        Primitive::String,
        Primitive::Object,
        Primitive::Void,
    ];

    /// The keyword spelling (`int`, `string`, ...).
    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Byte => "byte",
            Primitive::SByte => "sbyte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::UShort => "ushort",
            Primitive::Int => "int",
            Primitive::UInt => "uint",
            Primitive::Long => "long",
            Primitive::ULong => "ulong",
            Primitive::NInt => "nint",
            Primitive::NUInt => "nuint",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Decimal => "decimal",
            Primitive::String => "string",
            Primitive::Object => "object",
            Primitive::Void => "void",
        }
    }

    /// The runtime type name (`System.Int32`, ...).
    pub fn runtime_name(&self) -> &'static str {
        match self {
            Primitive::Bool => "System.Boolean",
            Primitive::Byte => "System.Byte",
            Primitive::SByte => "System.SByte",
            Primitive::Char => "System.Char",
            Primitive::Short => "System.Int16",
            Primitive::UShort => "System.UInt16",
            Primitive::Int => "System.Int32",
            Primitive::UInt => "System.UInt32",
            Primitive::Long => "System.Int64",
            Primitive::ULong => "System.UInt64",
            Primitive::NInt => "System.IntPtr",
            Primitive::NUInt => "System.UIntPtr",
            Primitive::Float => "System.Single",
            Primitive::Double => "System.Double",
            Primitive::Decimal => "System.Decimal",
            Primitive::String => "System.String",
            Primitive::Object => "System.Object",
            Primitive::Void => "System.Void",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    pub fn from_runtime_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.runtime_name() == name)
    }
}

/// A type as reported by reflection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    Primitive(Primitive),
    /// A nullable value type (`T?`).
    Nullable(Box<TypeDesc>),
    /// An array of the given rank (1 for `T[]`, 2 for `T[,]`, ...).
    Array { element: Box<TypeDesc>, rank: u8 },
    Named(NamedType),
    /// A generic type parameter (`T`).
    Parameter(String),
}

impl TypeDesc {
    pub fn nullable(inner: TypeDesc) -> Self {
        Self::Nullable(Box::new(inner))
    }

    pub fn array(element: TypeDesc, rank: u8) -> Self {
        Self::Array {
            element: Box::new(element),
            rank: rank.max(1),
        }
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Self::Parameter(name.into())
    }
}

impl From<Primitive> for TypeDesc {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<NamedType> for TypeDesc {
    fn from(named: NamedType) -> Self {
        Self::Named(named)
    }
}

/// A named class, struct, interface or enum.
///
/// As with reflection, `arity` counts every generic parameter in scope,
/// including those of declaring types, and the argument list of a nested
/// type starts with its declaring type's arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedType {
    pub namespace: Option<String>,
    pub name: String,
    pub declaring: Option<Box<NamedType>>,
    pub arity: usize,
    /// `None` for an open generic definition.
    pub args: Option<Vec<TypeDesc>>,
}

impl NamedType {
    /// A non-generic type.
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.into(),
            declaring: None,
            arity: 0,
            args: Some(Vec::new()),
        }
    }

    /// An open generic definition with `arity` parameters (`List<>`).
    pub fn definition(namespace: Option<&str>, name: impl Into<String>, arity: usize) -> Self {
        Self {
            arity,
            args: None,
            ..Self::new(namespace, name)
        }
    }

    /// A constructed generic type (`List<int>`).
    pub fn constructed(namespace: Option<&str>, name: impl Into<String>, args: Vec<TypeDesc>) -> Self {
        Self {
            arity: args.len(),
            args: Some(args),
            ..Self::new(namespace, name)
        }
    }

    /// A type nested in `declaring`.
    ///
    /// `own_arity` counts only the parameters the nested type introduces.
    /// `args`, when given, must start with the declaring type's arguments.
    pub fn nested(
        declaring: NamedType,
        name: impl Into<String>,
        own_arity: usize,
        args: Option<Vec<TypeDesc>>,
    ) -> Self {
        Self {
            namespace: declaring.namespace.clone(),
            name: name.into(),
            arity: declaring.arity + own_arity,
            declaring: Some(Box::new(declaring)),
            args,
        }
    }

    /// Number of generic parameters introduced by this type itself.
    pub fn own_arity(&self) -> usize {
        let inherited = self.declaring.as_ref().map_or(0, |d| d.arity);
        self.arity.saturating_sub(inherited)
    }

    /// Whether this is an open generic definition.
    pub fn is_definition(&self) -> bool {
        self.args.is_none() && self.arity > 0
    }

    /// The namespace of the outermost declaring type.
    pub fn root_namespace(&self) -> Option<&str> {
        match &self.declaring {
            Some(declaring) => declaring.root_namespace(),
            None => self.namespace.as_deref(),
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TypeNameFormatter::new().format(self, TypeNameMode::Qualified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_table() {
        assert_eq!(Primitive::Int.keyword(), "int");
        assert_eq!(Primitive::Int.runtime_name(), "System.Int32");
        assert_eq!(Primitive::from_keyword("decimal"), Some(Primitive::Decimal));
        assert_eq!(
            Primitive::from_runtime_name("System.Boolean"),
            Some(Primitive::Bool)
        );
        assert_eq!(Primitive::from_keyword("Int32"), None);
    }

    #[test]
    fn test_every_primitive_has_distinct_spellings() {
        for primitive in Primitive::ALL {
            assert_eq!(Primitive::from_keyword(primitive.keyword()), Some(primitive));
            assert_eq!(
                Primitive::from_runtime_name(primitive.runtime_name()),
                Some(primitive)
            );
        }
        assert_eq!(Primitive::Void.keyword(), "void");
        assert_eq!(Primitive::NUInt.runtime_name(), "System.UIntPtr");
    }

    #[test]
    fn test_nested_arity() {
        let outer = NamedType::definition(Some("Ns"), "Outer", 1);
        let inner = NamedType::nested(outer, "Inner", 2, None);
        assert_eq!(inner.arity, 3);
        assert_eq!(inner.own_arity(), 2);
        assert!(inner.is_definition());
        assert_eq!(inner.root_namespace(), Some("Ns"));
    }
}
