//! Named templates.

use std::path::Path;

use miette::NamedSource;
use tracing::debug;

use crate::{Constants, Error, Result, Snippet, error::line_span, transform::filter};

/// A template together with the text it was loaded from.
///
/// Keeping the original text lets errors point at the offending line in
/// the file the author edits, including its original line endings.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    source: String,
    snippet: Snippet,
}

impl Template {
    /// Create a template from source text.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let snippet = Snippet::new(source.lines());
        Self {
            name: name.into(),
            source,
            snippet,
        }
    }

    /// Load a template from a file. The file path becomes its name.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Ok(Self::new(path.display().to_string(), source))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn snippet(&self) -> &Snippet {
        &self.snippet
    }

    /// Filter the template for a set of constants.
    ///
    /// Errors carry this template's name and source.
    pub fn render(&self, constants: &Constants) -> Result<Snippet> {
        debug!(template = %self.name, %constants, "rendering template");
        filter(&self.snippet, constants).map_err(|failure| {
            let span = line_span(&self.source, failure.line);
            failure.into_error(NamedSource::new(&self.name, self.source.clone()), span)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use miette::SourceSpan;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_render() {
        let template = Template::new("id.tmpl", "#if A // exec\r\na\r\n#endif // exec\r\nb");
        let out = template.render(&Constants::from_iter(["A"])).unwrap();
        assert_eq!(out.lines(), ["a", "b"]);
    }

    #[test]
    fn test_error_points_into_original_source() {
        let template = Template::new("id.tmpl", "a\r\n#else // exec\r\n");
        let err = template.render(&Constants::new()).unwrap_err();

        match *err {
            Error::UnexpectedDirective { span, ref src, .. } => {
                assert_eq!(span, Some(SourceSpan::from((3, 13))));
                assert_eq!(src.name(), "id.tmpl");
            }
            ref other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_open() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "line one\nline two\n").unwrap();

        let template = Template::open(file.path()).unwrap();
        assert_eq!(template.snippet().len(), 2);
        assert_eq!(template.name(), file.path().display().to_string());
    }

    #[test]
    fn test_open_missing_file() {
        let err = Template::open("/definitely/not/here.tmpl").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
