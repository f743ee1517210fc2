//! Text output with managed indentation.
//!
//! [`CodeWriter`] accumulates text with explicit line terminators and tracks
//! a nesting depth. Indentation is written lazily at the start of each
//! non-empty line, so callers never count levels by hand. Nested regions are
//! opened with [`CodeWriter::enter_block`] and [`CodeWriter::enter_namespace`],
//! which return a [`Scope`] guard that closes the region when dropped.

mod indent;
mod scope;

use std::io;

pub use indent::{Indent, Newline};
use miette::Diagnostic;
pub use scope::{NamespaceStyle, Scope};
use serde::Deserialize;
use thiserror::Error;

/// Configuration of a [`CodeWriter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterOptions {
    /// Indentation unit per nesting level.
    pub indent: Indent,
    /// Line terminator.
    pub newline: Newline,
    /// Namespace declaration style.
    pub namespace_style: NamespaceStyle,
}

impl WriterOptions {
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_newline(mut self, newline: Newline) -> Self {
        self.newline = newline;
        self
    }

    pub fn with_namespace_style(mut self, style: NamespaceStyle) -> Self {
        self.namespace_style = style;
        self
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum WriterError {
    #[error("{depth} scope(s) still open")]
    #[diagnostic(
        code(stencil::unclosed_scope),
        help("every scope guard must be dropped before the output is finished")
    )]
    UnclosedScope { depth: usize },
}

/// Accumulates generated text with nested indentation.
///
/// # Example
///
/// ```
/// use stencil_codegen::writer::{CodeWriter, Newline, WriterOptions};
///
/// let mut writer = CodeWriter::new(WriterOptions::default().with_newline(Newline::Lf));
/// {
///     let mut body = writer.enter_block("{", "}");
///     body.line("body");
/// }
/// assert_eq!(writer.finish().unwrap(), "{\n    body\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeWriter {
    depth: usize,
    at_line_start: bool,
    unit: String,
    options: WriterOptions,
    buffer: String,
}

impl CodeWriter {
    /// Create a writer with the given options.
    pub fn new(options: WriterOptions) -> Self {
        Self {
            depth: 0,
            at_line_start: true,
            unit: options.indent.as_str().into_owned(),
            options,
            buffer: String::new(),
        }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether nothing has been written on the current line yet.
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// Append text without a terminator.
    ///
    /// Line breaks inside `text` (`\n` or `\r\n`) are written as the configured
    /// terminator, and the line after each one is indented like any other.
    pub fn write(&mut self, text: &str) -> &mut Self {
        for piece in text.split_inclusive('\n') {
            match piece.strip_suffix('\n') {
                Some(content) => {
                    self.push_text(content.strip_suffix('\r').unwrap_or(content));
                    self.blank_line();
                }
                None => self.push_text(piece),
            }
        }
        self
    }

    /// Append a single character without a terminator. `'\n'` ends the line.
    pub fn write_char(&mut self, c: char) -> &mut Self {
        if c == '\n' {
            return self.blank_line();
        }
        self.begin_line();
        self.buffer.push(c);
        self
    }

    /// Append text followed by the line terminator.
    pub fn line(&mut self, text: &str) -> &mut Self {
        self.write(text);
        self.blank_line()
    }

    /// Write a line terminator.
    ///
    /// At the start of a line this produces an empty line, without any
    /// trailing indentation; otherwise it ends the current line.
    pub fn blank_line(&mut self) -> &mut Self {
        self.buffer.push_str(self.options.newline.as_str());
        self.at_line_start = true;
        self
    }

    /// Write each item as a line. Blank items become empty lines.
    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                self.blank_line();
            } else {
                self.line(line);
            }
        }
        self
    }

    /// Emit the indentation unit once per nesting level.
    pub fn indent(&mut self) -> &mut Self {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.unit);
        }
        self.at_line_start = false;
        self
    }

    /// Write `open` as a line and enter a nested region closed by `close`.
    pub fn enter_block(&mut self, open: &str, close: impl Into<String>) -> Scope<'_> {
        self.line(open);
        Scope::new(self, Some(close.into()), true)
    }

    /// Declare a namespace in the configured [`NamespaceStyle`].
    pub fn enter_namespace(&mut self, name: &str) -> Scope<'_> {
        match self.options.namespace_style {
            NamespaceStyle::FileScoped => {
                self.line(&format!("namespace {name};"));
                self.blank_line();
                Scope::new(self, None, false)
            }
            NamespaceStyle::Block => {
                self.line(&format!("namespace {name}"));
                self.enter_block("{", "}")
            }
        }
    }

    /// Write a block whose body is produced by `f`.
    pub fn block<F>(&mut self, open: &str, close: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut CodeWriter),
    {
        {
            let mut scope = self.enter_block(open, close);
            f(&mut scope);
        }
        self
    }

    /// Write a block whose body may fail. The block is closed either way.
    pub fn try_block<F, E>(&mut self, open: &str, close: &str, f: F) -> Result<&mut Self, E>
    where
        F: FnOnce(&mut CodeWriter) -> Result<(), E>,
    {
        {
            let mut scope = self.enter_block(open, close);
            f(&mut scope)?;
        }
        Ok(self)
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Move the buffered text into `out`, leaving the buffer empty.
    ///
    /// Depth and line state are kept, so writing can continue afterwards.
    pub fn flush_into(&mut self, out: &mut impl io::Write) -> io::Result<()> {
        out.write_all(self.buffer.as_bytes())?;
        self.buffer.clear();
        Ok(())
    }

    /// Consume the writer and return the generated text.
    pub fn finish(self) -> Result<String, WriterError> {
        if self.depth != 0 {
            return Err(WriterError::UnclosedScope { depth: self.depth });
        }
        Ok(self.buffer)
    }

    pub(crate) fn push_depth(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn pop_depth(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn push_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.begin_line();
            self.buffer.push_str(text);
        }
    }

    fn begin_line(&mut self) {
        if self.at_line_start {
            self.indent();
        }
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new(WriterOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lf() -> CodeWriter {
        CodeWriter::new(WriterOptions::default().with_newline(Newline::Lf))
    }

    #[test]
    fn test_block_scope() {
        let mut writer = lf();
        {
            let mut scope = writer.enter_block("{", "}");
            scope.line("body");
        }
        assert_eq!(writer.finish().unwrap(), "{\n    body\n}\n");
    }

    #[test]
    fn test_default_newline_is_crlf() {
        let mut writer = CodeWriter::default();
        writer.line("a").line("b");
        assert_eq!(writer.finish().unwrap(), "a\r\nb\r\n");
    }

    #[test]
    fn test_nested_scopes() {
        let mut writer = lf();
        {
            let mut class = writer.enter_block("class A {", "}");
            class.line("int x;");
            {
                let mut method = class.enter_block("void M() {", "}");
                method.line("x++;");
            }
            class.line("int y;");
        }
        assert_eq!(
            writer.finish().unwrap(),
            "class A {\n    int x;\n    void M() {\n        x++;\n    }\n    int y;\n}\n"
        );
    }

    #[test]
    fn test_write_and_write_char() {
        let mut writer = lf();
        {
            let mut scope = writer.enter_block("[", "]");
            scope.write("a").write_char(',').write(" b");
        }
        assert_eq!(writer.finish().unwrap(), "[\n    a, b\n]\n");
    }

    #[test]
    fn test_embedded_newlines_are_indented() {
        let mut writer = lf();
        writer.block("{", "}", |w| {
            w.line("a\nb");
        });
        assert_eq!(writer.finish().unwrap(), "{\n    a\n    b\n}\n");
    }

    #[test]
    fn test_newline_char_ends_line() {
        let mut writer = lf();
        writer.block("{", "}", |w| {
            w.write("a").write_char('\n').write("b");
        });
        assert_eq!(writer.finish().unwrap(), "{\n    a\n    b\n}\n");
    }

    #[test]
    fn test_embedded_crlf_uses_configured_newline() {
        let mut writer = lf();
        writer.block("{", "}", |w| {
            w.write("a\r\n\r\nb\n");
        });
        assert_eq!(writer.finish().unwrap(), "{\n    a\n\n    b\n}\n");
    }

    #[test]
    fn test_explicit_indent() {
        let mut writer = lf();
        {
            let mut scope = writer.enter_block("{", "}");
            scope.indent().write("x").blank_line();
        }
        assert_eq!(writer.finish().unwrap(), "{\n    x\n}\n");
    }

    #[test]
    fn test_blank_lines_have_no_indentation() {
        let mut writer = lf();
        {
            let mut scope = writer.enter_block("{", "}");
            scope.lines(["a", "", "b"]);
        }
        assert_eq!(writer.finish().unwrap(), "{\n    a\n\n    b\n}\n");
    }

    #[test]
    fn test_namespace_file_scoped() {
        let mut writer = lf();
        {
            let mut ns = writer.enter_namespace("Shop.Orders");
            assert_eq!(ns.depth(), 0);
            ns.line("class A {}");
        }
        assert_eq!(
            writer.finish().unwrap(),
            "namespace Shop.Orders;\n\nclass A {}\n"
        );
    }

    #[test]
    fn test_namespace_block() {
        let mut writer = CodeWriter::new(
            WriterOptions::default()
                .with_newline(Newline::Lf)
                .with_namespace_style(NamespaceStyle::Block),
        );
        {
            let mut ns = writer.enter_namespace("Shop");
            assert_eq!(ns.depth(), 1);
            ns.line("class A {}");
        }
        assert_eq!(writer.finish().unwrap(), "namespace Shop\n{\n    class A {}\n}\n");
    }

    #[test]
    fn test_scope_closes_on_error() {
        let mut writer = lf();
        let result: Result<&mut CodeWriter, &str> = writer.try_block("{", "}", |w| {
            w.line("partial");
            Err("boom")
        });
        assert!(result.is_err());
        assert_eq!(writer.depth(), 0);
        assert_eq!(writer.finish().unwrap(), "{\n    partial\n}\n");
    }

    #[test]
    fn test_scope_closes_on_panic() {
        let mut writer = lf();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            writer.block("{", "}", |w| {
                w.line("before");
                panic!("generation failed");
            });
        }));
        assert!(result.is_err());
        assert_eq!(writer.depth(), 0);
        assert!(writer.as_str().ends_with("}\n"));
    }

    #[test]
    fn test_close_terminates_open_line() {
        let mut writer = lf();
        writer.block("{", "}", |w| {
            w.write("dangling");
        });
        assert_eq!(writer.finish().unwrap(), "{\n    dangling\n}\n");
    }

    #[test]
    fn test_tab_indent() {
        let mut writer = CodeWriter::new(
            WriterOptions::default()
                .with_newline(Newline::Lf)
                .with_indent(Indent::Tab),
        );
        writer.block("{", "}", |w| {
            w.line("x");
        });
        assert_eq!(writer.finish().unwrap(), "{\n\tx\n}\n");
    }

    #[test]
    fn test_leaked_scope_is_reported() {
        let mut writer = lf();
        std::mem::forget(writer.enter_block("{", "}"));
        assert!(matches!(
            writer.finish(),
            Err(WriterError::UnclosedScope { depth: 1 })
        ));
    }

    #[test]
    fn test_flush_into_streams() {
        let mut writer = lf();
        let mut out = Vec::new();
        writer.line("first");
        writer.flush_into(&mut out).unwrap();
        writer.line("second");
        writer.flush_into(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "first\nsecond\n");
        assert_eq!(writer.as_str(), "");
    }
}
