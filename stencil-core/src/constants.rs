//! Feature flags enabled for a generation run.

use std::fmt;

use indexmap::IndexSet;

/// The set of constants (named boolean flags) enabled for a run.
///
/// Names are case-sensitive and compared exactly. Insertion order is kept so
/// that reports list constants the way they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constants {
    names: IndexSet<String>,
}

impl Constants {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a list of names separated by commas, semicolons or whitespace.
    ///
    /// This is the format compilers use for their defined symbols
    /// (`"NET6_0;NET6_0_OR_GREATER"`). Empty entries are skipped.
    pub fn parse_list(list: &str) -> Self {
        list.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Enable a constant. Returns `false` if it was already enabled.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Whether a constant is enabled.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Evaluate a directive condition.
    ///
    /// Unknown names are simply not present.
    pub fn evaluate(&self, name: &str, negate: bool) -> bool {
        self.contains(name) ^ negate
    }

    /// A new set holding the constants of both sets, `self` first.
    pub fn union(&self, other: &Constants) -> Self {
        let mut names = self.names.clone();
        names.extend(other.names.iter().cloned());
        Self { names }
    }

    /// Iterate over the names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Constants {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for Constants {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

impl fmt::Display for Constants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_applies_negation() {
        let constants = Constants::from_iter(["DEBUG"]);

        assert!(constants.evaluate("DEBUG", false));
        assert!(!constants.evaluate("DEBUG", true));
        assert!(!constants.evaluate("RELEASE", false));
        assert!(constants.evaluate("RELEASE", true));
    }

    #[test]
    fn test_case_sensitive() {
        let constants = Constants::from_iter(["Debug"]);
        assert!(!constants.contains("DEBUG"));
    }

    #[test]
    fn test_parse_list() {
        let constants = Constants::parse_list("NET6_0; NET6_0_OR_GREATER,,TRACE");
        assert_eq!(
            constants.iter().collect::<Vec<_>>(),
            ["NET6_0", "NET6_0_OR_GREATER", "TRACE"]
        );
    }

    #[test]
    fn test_union_keeps_order_and_dedups() {
        let run = Constants::from_iter(["A", "B"]);
        let unit = Constants::from_iter(["B", "C"]);

        let merged = run.union(&unit);

        assert_eq!(merged.iter().collect::<Vec<_>>(), ["A", "B", "C"]);
        assert_eq!(merged.to_string(), "A, B, C");
    }
}
