//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use stencil_codegen::Literal;

use super::{Manifest, TypeConfig, validate::ParseContext};
use crate::{Error, Result};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "stencil.toml")
    }
}

impl Manifest {
    /// Parse a stencil.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a stencil.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse and validate a manifest.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = ParseContext::new(content, filename);
    let manifest: Manifest =
        toml::from_str(content).map_err(|e| ctx.source_context().parse_error(e))?;
    validate_manifest(&manifest, &ctx)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, ctx: &ParseContext<'_>) -> Result<()> {
    let generator = ctx.push("generator");
    for constant in &manifest.generator.constants {
        generator.validate_constant(constant)?;
    }
    for namespace in &manifest.generator.usings {
        generator.validate_namespace(namespace)?;
    }
    let extension = &manifest.generator.extension;
    if !extension.is_empty() && !extension.starts_with('.') {
        return Err(ctx.source_context().validation_error(
            "extension must start with '.'",
            ctx.find_value(extension),
        ));
    }

    for (name, template) in &manifest.templates {
        ctx.validate_name(name, "template")?;
        if template.path.as_os_str().is_empty() {
            return Err(ctx.source_context().validation_error(
                format!("template '{name}' has an empty path"),
                ctx.find_span(name),
            ));
        }
    }

    for (name, ty) in &manifest.types {
        ctx.validate_name(name, "type")?;
        validate_type(manifest, name, ty, &ctx.push("types").push(name))?;
    }
    Ok(())
}

fn validate_type(
    manifest: &Manifest,
    name: &str,
    ty: &TypeConfig,
    ctx: &ParseContext<'_>,
) -> Result<()> {
    let source = ctx.source_context();

    ctx.validate_namespace(&ty.namespace)?;

    if !manifest.has_template(&ty.template) {
        let declared: Vec<&str> = manifest.templates.keys().map(String::as_str).collect();
        return Err(source.unknown_template_error(
            name,
            &ty.template,
            &declared,
            ctx.find_value(&ty.template),
        ));
    }

    for (text, parsed, what) in [
        (&ty.value_type, ty.value_type(), "value_type"),
        (&ty.behavior, ty.behavior(), "behavior"),
    ] {
        if let (Some(text), Some(Err(e))) = (text, parsed) {
            return Err(source.invalid_type_error(
                ctx.context_for(what),
                e,
                ctx.find_value(text),
            ));
        }
    }

    for constant in &ty.constants {
        ctx.validate_constant(constant)?;
    }

    for key in ty.replace.keys() {
        ctx.validate_name(key, "replacement")?;
    }

    for (key, value) in &ty.literals {
        ctx.validate_name(key, "literal")?;
        if ty.replace.contains_key(key) {
            return Err(source.validation_error(
                format!("'{key}' is declared both as a replacement and a literal"),
                ctx.find_span(key),
            ));
        }
        if let Err(e) = Literal::try_from(value) {
            return Err(source.unsupported_literal_error(key, e, ctx.find_span(key)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
[generator]
output = "Generated"
constants = ["NET6_0_OR_GREATER"]
usings = ["System"]
header = ["// <auto-generated/>"]

[writer]
indent = 2
newline = "lf"
namespace_style = "block"

[templates.strong_id]
path = "templates/StrongId.cs.tmpl"

[types.OrderId]
namespace = "Shop.Orders"
template = "strong_id"
value_type = "System.Guid"
constants = ["EF_CORE"]

[types.OrderId.replace]
Prefix = "ord"

[types.OrderId.literals]
DefaultValue = 0
Kind = { enum = "Shop.IdKind", member = "Order" }

[types.Sku]
template = "strong_id"
value_type = "string"
"#;

    #[test]
    fn test_parse_valid_manifest() {
        let manifest: Manifest = VALID.parse().unwrap();

        assert_eq!(manifest.generator.extension, ".cs");
        assert_eq!(manifest.writer.indent, stencil_codegen::Indent::TWO_SPACES);
        assert_eq!(manifest.writer.newline, stencil_codegen::Newline::Lf);
        assert_eq!(
            manifest.types.keys().collect::<Vec<_>>(),
            ["OrderId", "Sku"]
        );

        let unit = manifest.types["OrderId"].unit("OrderId").unwrap();
        assert_eq!(unit.hint_name(), "Shop.Orders.OrderId.g");
        assert!(unit.constants.contains("EF_CORE"));
        assert_eq!(unit.literals.len(), 2);

        let sku = manifest.types["Sku"].unit("Sku").unwrap();
        assert_eq!(sku.hint_name(), "Sku.g");
    }

    #[test]
    fn test_unknown_template_points_at_value() {
        let src = "[types.OrderId]\ntemplate = \"missing\"";
        let err = parse_manifest(src, "stencil.toml").unwrap_err();
        match *err {
            Error::UnknownTemplate {
                template, span, ..
            } => {
                assert_eq!(template, "missing");
                assert_eq!(span.map(|s| s.offset()), Some(28));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_type_name_points_at_key() {
        let src = "[templates.t]\npath = \"t\"\n\n[types.Order-Id]\ntemplate = \"t\"";
        let err = parse_manifest(src, "stencil.toml").unwrap_err();
        match *err {
            Error::InvalidIdentifier { name, span, .. } => {
                assert_eq!(name, "Order-Id");
                assert_eq!(span.map(|s| s.offset()), Some(33));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_value_type() {
        let src = "[templates.t]\npath = \"t\"\n[types.A]\ntemplate = \"t\"\nvalue_type = \"List<\"";
        let err = parse_manifest(src, "stencil.toml").unwrap_err();
        assert!(matches!(*err, Error::InvalidType { .. }));
        assert_eq!(err.to_string(), "invalid value_type in 'types.A'");
    }

    #[test]
    fn test_unsupported_literal() {
        let src = "[templates.t]\npath = \"t\"\n[types.A]\ntemplate = \"t\"\n[types.A.literals]\nRatio = 0.5";
        let err = parse_manifest(src, "stencil.toml").unwrap_err();
        assert!(matches!(*err, Error::Literal { ref key, .. } if key == "Ratio"));
    }

    #[test]
    fn test_unit_error_is_a_diagnostic() {
        use miette::Diagnostic;

        let ty = TypeConfig {
            template: "t".to_string(),
            value_type: Some("List<".to_string()),
            ..TypeConfig::default()
        };

        let err = ty.unit("A").unwrap_err();

        assert!(matches!(err, crate::UnitConfigError::ValueType(_)));
        assert!(err.to_string().starts_with("invalid value_type: invalid type `List<`"));
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("stencil::manifest::value_type")
        );
        assert!(err.help().is_some());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_constant() {
        let src = "[generator]\nconstants = [\"NET-6\"]";
        let err = parse_manifest(src, "stencil.toml").unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let src = "[generator]\noutptu = \"x\"";
        let err = parse_manifest(src, "stencil.toml").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_extension_must_start_with_dot() {
        let src = "[generator]\nextension = \"cs\"";
        let err = parse_manifest(src, "stencil.toml").unwrap_err();
        assert_eq!(err.to_string(), "extension must start with '.'");
    }
}
