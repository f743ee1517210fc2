//! Immutable, ordered sequences of text lines.

use std::{
    convert::Infallible,
    fmt,
    io::{self, BufRead},
    str::FromStr,
};

use crate::{Constants, Result, Substitutions};

/// An immutable ordered sequence of text lines.
///
/// Snippets are the unit of input and output of the template engine. Every
/// operation that changes content returns a new snippet; the receiver is
/// never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Snippet {
    lines: Vec<String>,
}

impl Snippet {
    /// Create a snippet from a sequence of lines.
    ///
    /// Items are taken as given: an item holding a line break stays one line.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Read a snippet line by line.
    ///
    /// Line terminators (`\n` or `\r\n`) are not part of the lines.
    pub fn from_reader(reader: impl BufRead) -> io::Result<Self> {
        let lines = reader.lines().collect::<io::Result<Vec<_>>>()?;
        Ok(Self { lines })
    }

    /// The lines of this snippet.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the snippet has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Filter this snippet according to its live directives.
    ///
    /// See [`crate::transform()`].
    pub fn transform(&self, constants: &Constants) -> Result<Self> {
        crate::transform(self, constants)
    }

    /// Replace every placeholder in every line.
    pub fn substitute(&self, substitutions: &Substitutions) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .map(|line| substitutions.apply(line))
                .collect(),
        }
    }

    /// Join the lines, terminating each with `newline`.
    pub fn join(&self, newline: &str) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push_str(newline);
        }
        out
    }
}

impl FromStr for Snippet {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::new(s.lines()))
    }
}

impl From<Vec<String>> for Snippet {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

impl<'a> IntoIterator for &'a Snippet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join("\n"))
    }
}
