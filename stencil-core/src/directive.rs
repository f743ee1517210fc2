//! Lexical classification of template lines.
//!
//! Four keywords are recognized: `#if`, `#elif`, `#else` and `#endif`. A line
//! is only checked against the directive grammar when it starts with one of
//! them; such a line must then match the grammar exactly:
//!
//! ```text
//! #if [!]NAME [// exec]
//! #elif [!]NAME [// exec]
//! #else [// exec]
//! #endif [// exec]
//! ```
//!
//! `NAME` is `[A-Za-z0-9_]+`. Only a single, optionally negated name is
//! allowed; there is no expression language.

use std::{fmt, sync::LazyLock};

use regex::Regex;

/// A directive keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    If,
    ElseIf,
    Else,
    EndIf,
}

impl Keyword {
    /// Keywords in the order lines are tested against them.
    pub const ALL: [Keyword; 4] = [Keyword::If, Keyword::ElseIf, Keyword::Else, Keyword::EndIf];

    /// The keyword as written in templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::If => "#if",
            Keyword::ElseIf => "#elif",
            Keyword::Else => "#else",
            Keyword::EndIf => "#endif",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Keyword::If => &IF,
            Keyword::ElseIf => &ELIF,
            Keyword::Else => &ELSE,
            Keyword::EndIf => &ENDIF,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker that makes a directive drive generation.
pub const LIVE_MARKER: &str = "// exec";

const NAME: &str = r"[A-Za-z0-9_]+";
const LIVE: &str = r"(?P<live>[ \t]*//[ \t]*exec)?[ \t]*$";

static IF: LazyLock<Regex> = LazyLock::new(|| conditional("if"));
static ELIF: LazyLock<Regex> = LazyLock::new(|| conditional("elif"));
static ELSE: LazyLock<Regex> = LazyLock::new(|| branch("else"));
static ENDIF: LazyLock<Regex> = LazyLock::new(|| branch("endif"));
static CONSTANT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{NAME}$")).expect("constant name pattern"));

fn conditional(keyword: &str) -> Regex {
    Regex::new(&format!(
        r"^#{keyword}[ \t]+(?P<negate>!?)(?P<name>{NAME}){LIVE}"
    ))
    .expect("conditional directive pattern")
}

fn branch(keyword: &str) -> Regex {
    Regex::new(&format!(r"^#{keyword}{LIVE}")).expect("branch directive pattern")
}

/// Whether `name` is usable as a constant in a directive.
pub fn is_constant_name(name: &str) -> bool {
    CONSTANT_NAME.is_match(name)
}

/// The classification of one template line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    If {
        negate: bool,
        name: &'a str,
        live: bool,
    },
    ElseIf {
        negate: bool,
        name: &'a str,
        live: bool,
    },
    Else {
        live: bool,
    },
    EndIf {
        live: bool,
    },
    /// Any line that does not start with a directive keyword.
    Plain,
}

/// A line starting with a directive keyword that does not match its grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPattern {
    pub keyword: Keyword,
}

impl<'a> Directive<'a> {
    /// Classify a line.
    pub fn parse(line: &'a str) -> Result<Self, InvalidPattern> {
        let Some(keyword) = Keyword::ALL
            .into_iter()
            .find(|keyword| line.starts_with(keyword.as_str()))
        else {
            return Ok(Directive::Plain);
        };

        let captures = keyword
            .pattern()
            .captures(line)
            .ok_or(InvalidPattern { keyword })?;

        let live = captures.name("live").is_some();
        let condition = || {
            let negate = captures.name("negate").is_some_and(|m| !m.as_str().is_empty());
            let name = captures.name("name").map_or("", |m| m.as_str());
            (negate, name)
        };

        Ok(match keyword {
            Keyword::If => {
                let (negate, name) = condition();
                Directive::If { negate, name, live }
            }
            Keyword::ElseIf => {
                let (negate, name) = condition();
                Directive::ElseIf { negate, name, live }
            }
            Keyword::Else => Directive::Else { live },
            Keyword::EndIf => Directive::EndIf { live },
        })
    }

    /// The keyword of this directive, if any.
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Directive::If { .. } => Some(Keyword::If),
            Directive::ElseIf { .. } => Some(Keyword::ElseIf),
            Directive::Else { .. } => Some(Keyword::Else),
            Directive::EndIf { .. } => Some(Keyword::EndIf),
            Directive::Plain => None,
        }
    }

    /// Whether this directive carries the live marker.
    pub fn is_live(&self) -> bool {
        match *self {
            Directive::If { live, .. }
            | Directive::ElseIf { live, .. }
            | Directive::Else { live }
            | Directive::EndIf { live } => live,
            Directive::Plain => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines() {
        assert_eq!(Directive::parse("int x = 1;"), Ok(Directive::Plain));
        assert_eq!(Directive::parse(""), Ok(Directive::Plain));
        // Leading whitespace means the line does not start with a keyword.
        assert_eq!(Directive::parse("    #if X // exec"), Ok(Directive::Plain));
        assert_eq!(Directive::parse("#region Members"), Ok(Directive::Plain));
    }

    #[test]
    fn test_live_if() {
        assert_eq!(
            Directive::parse("#if NET6_0 // exec"),
            Ok(Directive::If {
                negate: false,
                name: "NET6_0",
                live: true
            })
        );
        assert_eq!(
            Directive::parse("#if !NET6_0//exec"),
            Ok(Directive::If {
                negate: true,
                name: "NET6_0",
                live: true
            })
        );
    }

    #[test]
    fn test_non_live_if() {
        let directive = Directive::parse("#if NET6_0").unwrap();
        assert_eq!(
            directive,
            Directive::If {
                negate: false,
                name: "NET6_0",
                live: false
            }
        );
        assert!(!directive.is_live());
    }

    #[test]
    fn test_elif() {
        assert_eq!(
            Directive::parse("#elif\tA_B // exec  "),
            Ok(Directive::ElseIf {
                negate: false,
                name: "A_B",
                live: true
            })
        );
    }

    #[test]
    fn test_else_and_endif() {
        assert_eq!(
            Directive::parse("#else // exec"),
            Ok(Directive::Else { live: true })
        );
        assert_eq!(Directive::parse("#else"), Ok(Directive::Else { live: false }));
        assert_eq!(
            Directive::parse("#endif //   exec"),
            Ok(Directive::EndIf { live: true })
        );
        assert_eq!(Directive::parse("#endif"), Ok(Directive::EndIf { live: false }));
    }

    #[test]
    fn test_invalid_patterns() {
        let invalid = [
            ("#if", Keyword::If),
            ("#if A || B", Keyword::If),
            ("#ifdef A", Keyword::If),
            ("#if ! A // exec", Keyword::If),
            ("#elif", Keyword::ElseIf),
            ("#else A", Keyword::Else),
            ("#elsewhere", Keyword::Else),
            ("#endif // run", Keyword::EndIf),
        ];

        for (line, keyword) in invalid {
            assert_eq!(
                Directive::parse(line),
                Err(InvalidPattern { keyword }),
                "{line}"
            );
        }
    }

    #[test]
    fn test_keyword() {
        assert_eq!(
            Directive::parse("#elif A").unwrap().keyword(),
            Some(Keyword::ElseIf)
        );
        assert_eq!(Directive::Plain.keyword(), None);
    }

    #[test]
    fn test_is_constant_name() {
        assert!(is_constant_name("NET6_0_OR_GREATER"));
        assert!(is_constant_name("1"));
        assert!(!is_constant_name(""));
        assert!(!is_constant_name("A-B"));
        assert!(!is_constant_name("!A"));
    }
}
