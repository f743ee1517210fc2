use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::{Keyword, Mode};

/// Result type for template operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read template '{path}'")]
    #[diagnostic(code(stencil::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pattern at line {line}: {text}")]
    #[diagnostic(
        code(stencil::invalid_pattern),
        help(
            "directives take the form `#if [!]NAME // exec`, `#elif [!]NAME // exec`, `#else // exec` or `#endif // exec`"
        )
    )]
    InvalidPattern {
        line: usize,
        text: String,
        keyword: Keyword,
        #[source_code]
        src: NamedSource<String>,
        #[label("starts with {keyword} but is not a valid directive")]
        span: Option<SourceSpan>,
    },

    #[error("unexpected {directive} in {mode} mode at line {line}: {text}")]
    #[diagnostic(
        code(stencil::unexpected_directive),
        help("conditional groups cannot be nested and hold at most one `#elif`")
    )]
    UnexpectedDirective {
        line: usize,
        text: String,
        directive: Keyword,
        mode: Mode,
        #[source_code]
        src: NamedSource<String>,
        #[label("{directive} is not allowed here")]
        span: Option<SourceSpan>,
    },

    #[error("missing closing #endif statement at line {line}: {text}")]
    #[diagnostic(
        code(stencil::missing_endif),
        help("close the group with `#endif // exec`")
    )]
    MissingEndIf {
        line: usize,
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("template ends inside a conditional group")]
        span: Option<SourceSpan>,
    },
}

impl Error {
    /// The 1-based line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Io { .. } => None,
            Error::InvalidPattern { line, .. }
            | Error::UnexpectedDirective { line, .. }
            | Error::MissingEndIf { line, .. } => Some(*line),
        }
    }

    /// The raw text of the offending line, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Error::Io { .. } => None,
            Error::InvalidPattern { text, .. }
            | Error::UnexpectedDirective { text, .. }
            | Error::MissingEndIf { text, .. } => Some(text),
        }
    }
}

/// Byte span of a 1-based line in `src`, without its terminator.
pub(crate) fn line_span(src: &str, line: usize) -> Option<SourceSpan> {
    let mut offset = 0;
    for (index, raw) in src.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let content = raw.trim_end_matches('\n').trim_end_matches('\r');
            return Some(SourceSpan::from((offset, content.len())));
        }
        offset += raw.len();
    }
    None
}
