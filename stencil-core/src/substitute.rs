//! Placeholder replacement.
//!
//! Placeholders are keys wrapped in dollar signs (`$TypeName$`). They are
//! replaced after conditional filtering, in a single scan of each line, so a
//! replacement value is never itself searched for placeholders.

use indexmap::IndexMap;

/// Ordered placeholder → value replacements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    entries: IndexMap<String, String>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a replacement for `$key$`, consuming and returning `self`.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or overwrite the replacement for `$key$`.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(placeholder(key), value.into());
    }

    /// Replace every placeholder in `line`.
    pub fn apply(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut rest = line;
        while let Some(start) = rest.find('$') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            let known = tail[1..].find('$').and_then(|end| {
                let placeholder = &tail[..end + 2];
                self.entries
                    .get(placeholder)
                    .map(|value| (value, placeholder.len()))
            });
            match known {
                Some((value, len)) => {
                    out.push_str(value);
                    rest = &tail[len..];
                }
                None => {
                    out.push('$');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Iterate over `(placeholder, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The placeholder text for a key.
pub fn placeholder(key: &str) -> String {
    format!("${key}$")
}
