//! Literal values substituted into templates.

use std::fmt::Write;

use miette::Diagnostic;
use thiserror::Error;
use toml::Value;

use crate::type_name::{TypeDesc, TypeNameFormatter, TypeParseError};

/// A value that can be written as a source literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    /// An enum member, `Ty.Member`.
    Enum { ty: TypeDesc, member: String },
    /// A type token, `typeof(T)`.
    Type(TypeDesc),
}

#[derive(Debug, Error, Diagnostic)]
pub enum LiteralError {
    #[error("unsupported literal kind: {kind}")]
    #[diagnostic(
        code(stencil::literal::unsupported),
        help("use a boolean, integer, string, or a table with `null`, `type`, or `enum` + `member`")
    )]
    Unsupported { kind: &'static str },

    #[error("invalid type in literal")]
    #[diagnostic(code(stencil::literal::invalid_type))]
    InvalidType(#[source] TypeParseError),

    #[error("enum literal for `{ty}` is missing its `member`")]
    #[diagnostic(code(stencil::literal::missing_member))]
    MissingMember { ty: String },
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Render the literal, naming types through `formatter`.
    pub fn render(&self, formatter: &TypeNameFormatter) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::String(value) => quote(value),
            Self::Enum { ty, member } => format!("{}.{member}", formatter.qualified(ty)),
            Self::Type(ty) => format!("typeof({})", formatter.qualified(ty)),
        }
    }

    /// Name of the literal kind, as used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::String(_) => "string",
            Self::Enum { .. } => "enum",
            Self::Type(_) => "type",
        }
    }
}

impl TryFrom<&Value> for Literal {
    type Error = LiteralError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Boolean(value) => Ok(Self::Bool(*value)),
            Value::Integer(value) => Ok(Self::Int(*value)),
            Value::String(value) => Ok(Self::String(value.clone())),
            Value::Float(_) => Err(LiteralError::Unsupported { kind: "float" }),
            Value::Datetime(_) => Err(LiteralError::Unsupported { kind: "datetime" }),
            Value::Array(_) => Err(LiteralError::Unsupported { kind: "array" }),
            Value::Table(table) => {
                if table.get("null").and_then(Value::as_bool) == Some(true) {
                    return Ok(Self::Null);
                }
                if let Some(ty) = table.get("type").and_then(Value::as_str) {
                    return parse_type(ty).map(Self::Type);
                }
                if let Some(ty) = table.get("enum").and_then(Value::as_str) {
                    let member = table
                        .get("member")
                        .and_then(Value::as_str)
                        .ok_or_else(|| LiteralError::MissingMember { ty: ty.to_string() })?;
                    return Ok(Self::Enum {
                        ty: parse_type(ty)?,
                        member: member.to_string(),
                    });
                }
                Err(LiteralError::Unsupported { kind: "table" })
            }
        }
    }
}

fn parse_type(ty: &str) -> Result<TypeDesc, LiteralError> {
    TypeDesc::parse(ty).map_err(LiteralError::InvalidType)
}

/// Quote and escape a string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(source: &str) -> Result<Literal, LiteralError> {
        let value: toml::Table = toml::from_str(&format!("v = {source}")).unwrap();
        Literal::try_from(&value["v"])
    }

    #[test]
    fn test_scalars() {
        let f = TypeNameFormatter::new();
        assert_eq!(literal("true").unwrap().render(&f), "true");
        assert_eq!(literal("-42").unwrap().render(&f), "-42");
        assert_eq!(literal(r#""a\"b""#).unwrap().render(&f), r#""a\"b""#);
        assert_eq!(literal("{ null = true }").unwrap().render(&f), "null");
    }

    #[test]
    fn test_type_and_enum() {
        let f = TypeNameFormatter::new().with_available_namespaces(["System"]);
        assert_eq!(
            literal(r#"{ type = "System.Guid" }"#).unwrap().render(&f),
            "typeof(Guid)"
        );
        assert_eq!(
            literal(r#"{ enum = "System.StringComparison", member = "Ordinal" }"#)
                .unwrap()
                .render(&f),
            "StringComparison.Ordinal"
        );
    }

    #[test]
    fn test_unsupported_kinds() {
        assert!(matches!(
            literal("1.5"),
            Err(LiteralError::Unsupported { kind: "float" })
        ));
        assert!(matches!(
            literal("[1, 2]"),
            Err(LiteralError::Unsupported { kind: "array" })
        ));
        assert!(matches!(
            literal("{ other = 1 }"),
            Err(LiteralError::Unsupported { kind: "table" })
        ));
        assert!(matches!(
            literal(r#"{ enum = "Color" }"#),
            Err(LiteralError::MissingMember { .. })
        ));
        assert!(matches!(
            literal(r#"{ type = "List<" }"#),
            Err(LiteralError::InvalidType(_))
        ));
    }

    #[test]
    fn test_quote_escapes_controls() {
        assert_eq!(quote("a\tb\nc\\"), r#""a\tb\nc\\""#);
        assert_eq!(quote("\u{1}"), r#""\u0001""#);
    }
}
