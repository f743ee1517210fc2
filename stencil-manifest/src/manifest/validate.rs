//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;
use stencil_core::is_constant_name;

use crate::{Result, error::SourceContext};

/// Source information plus the current path through the manifest, for
/// located validation errors.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "stencil.toml");
/// ctx.validate_name("OrderId", "type")?;
///
/// let nested = ctx.push("types").push("OrderId");
/// nested.validate_constant("EF_CORE")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// For example: "constant in 'types.OrderId'" or just "type" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    pub fn find_value(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), value)
    }

    /// Validate that a table key names a usable identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }
        Ok(())
    }

    /// Validate a constant name as directives spell them.
    pub fn validate_constant(&self, name: &str) -> Result<()> {
        if !is_constant_name(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for("constant"),
                "constants may contain only letters, numbers, and underscores",
                self.find_value(name),
            ));
        }
        Ok(())
    }

    /// Validate a dotted namespace. The empty namespace is the global one.
    pub fn validate_namespace(&self, namespace: &str) -> Result<()> {
        if namespace.is_empty() {
            return Ok(());
        }
        for segment in namespace.split('.') {
            if let Some(reason) = validate_identifier(segment) {
                return Err(self.source.invalid_identifier_error(
                    namespace,
                    self.context_for("namespace"),
                    reason,
                    self.find_value(namespace),
                ));
            }
        }
        Ok(())
    }
}

/// C# reserved keywords that cannot name a generated type
pub(crate) const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

pub(crate) fn is_keyword(name: &str) -> bool {
    CSHARP_KEYWORDS.contains(&name)
}

/// Find the span of a table key in the TOML source, e.g. `[types.name]`,
/// `[types.name.replace]` or `{ name = ... }`.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let headers = [format!(".{name}]"), format!(".{name}.")];
    for pattern in &headers {
        if let Some(pos) = src.find(pattern) {
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    let inline = [
        (format!("{{ {name} "), 2usize),
        (format!("{{ {name}="), 2),
        (format!("{{{name}="), 1),
        (format!(", {name} "), 2),
        (format!(", {name}="), 2),
        (format!(",{name}="), 1),
        (format!("\n{name} ="), 1),
        (format!("\n{name}="), 1),
    ];
    for (pattern, skip) in &inline {
        if let Some(pos) = src.find(pattern) {
            return Some(SourceSpan::from((pos + skip, name.len())));
        }
    }

    None
}

/// Find the span of a quoted string value, excluding the quotes.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{value}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, value.len())));
        }
    }
    None
}

/// Returns `None` if `name` is a valid identifier, or the reason it is not.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers, and underscores");
    }

    if is_keyword(name) {
        return Some("name is a C# reserved keyword");
    }

    None
}
