//! Scope guards for nested output regions.

use std::ops::{Deref, DerefMut};

use serde::Deserialize;

use super::CodeWriter;

/// How namespaces are declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamespaceStyle {
    /// `namespace Foo;` followed by the body at unchanged depth.
    #[default]
    FileScoped,
    /// `namespace Foo` / `{` / indented body / `}`.
    Block,
}

/// An open region of a [`CodeWriter`].
///
/// The guard dereferences to the writer, so nested content is written
/// through it. Dropping the guard restores the previous depth and writes the
/// closing marker, whichever way the enclosing code is left.
#[must_use = "the scope closes as soon as the guard is dropped"]
pub struct Scope<'w> {
    writer: &'w mut CodeWriter,
    close: Option<String>,
    indented: bool,
}

impl<'w> Scope<'w> {
    pub(super) fn new(writer: &'w mut CodeWriter, close: Option<String>, indented: bool) -> Self {
        if indented {
            writer.push_depth();
        }
        Self {
            writer,
            close,
            indented,
        }
    }

    /// Close the scope now.
    pub fn close(self) {}
}

impl Deref for Scope<'_> {
    type Target = CodeWriter;

    fn deref(&self) -> &CodeWriter {
        self.writer
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut CodeWriter {
        self.writer
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if self.indented {
            self.writer.pop_depth();
        }
        if let Some(close) = self.close.take() {
            if !self.writer.at_line_start() {
                self.writer.blank_line();
            }
            self.writer.line(&close);
        }
    }
}
