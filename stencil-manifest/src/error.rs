use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use stencil_codegen::{LiteralError, TypeParseError};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source text and filename of a manifest, for building located errors.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    pub fn unknown_template_error(
        &self,
        ty: impl Into<String>,
        template: impl Into<String>,
        declared: &[&str],
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        let declared = if declared.is_empty() {
            "none".to_string()
        } else {
            declared.join(", ")
        };
        Box::new(Error::UnknownTemplate {
            src: self.named_source(),
            span,
            ty: ty.into(),
            template: template.into(),
            declared,
        })
    }

    pub fn invalid_type_error(
        &self,
        context: impl Into<String>,
        source: TypeParseError,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidType {
            src: self.named_source(),
            span,
            context: context.into(),
            source,
        })
    }

    pub fn unsupported_literal_error(
        &self,
        key: impl Into<String>,
        source: LiteralError,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Literal {
            src: self.named_source(),
            span,
            key: key.into(),
            source,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(stencil::manifest::io),
        help("pass the manifest location with --config")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stencil.toml")]
    #[diagnostic(code(stencil::manifest::parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(stencil::manifest::validation))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(stencil::manifest::identifier),
        help("{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore.")
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("type '{ty}' uses undeclared template '{template}'")]
    #[diagnostic(
        code(stencil::manifest::unknown_template),
        help("declare it as [templates.{template}]; declared templates: {declared}")
    )]
    UnknownTemplate {
        #[source_code]
        src: NamedSource<String>,
        #[label("not declared")]
        span: Option<SourceSpan>,
        ty: String,
        template: String,
        declared: String,
    },

    #[error("invalid {context}")]
    #[diagnostic(code(stencil::manifest::invalid_type))]
    InvalidType {
        #[source_code]
        src: NamedSource<String>,
        #[label("{source}")]
        span: Option<SourceSpan>,
        context: String,
        #[source]
        source: TypeParseError,
    },

    #[error("invalid literal '{key}'")]
    #[diagnostic(code(stencil::manifest::literal))]
    Literal {
        #[source_code]
        src: NamedSource<String>,
        #[label("{source}")]
        span: Option<SourceSpan>,
        key: String,
        #[source]
        source: LiteralError,
    },
}
