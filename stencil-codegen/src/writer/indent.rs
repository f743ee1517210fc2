//! Indentation and line terminator configuration.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, de::Error as _};

/// Indentation unit for one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation.
    pub const FOUR_SPACES: Self = Self::Spaces(4);

    /// 2-space indentation.
    pub const TWO_SPACES: Self = Self::Spaces(2);

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> Cow<'static, str> {
        match self {
            Self::Spaces(2) => Cow::Borrowed("  "),
            Self::Spaces(4) => Cow::Borrowed("    "),
            Self::Spaces(n) => Cow::Owned(" ".repeat(usize::from(*n))),
            Self::Tab => Cow::Borrowed("\t"),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::FOUR_SPACES
    }
}

impl<'de> Deserialize<'de> for Indent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Width(u8),
            Named(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Width(width) => Ok(Self::Spaces(width)),
            Raw::Named(name) if name == "tab" => Ok(Self::Tab),
            Raw::Named(name) => Err(D::Error::custom(format!(
                "invalid indent '{name}', expected a number of spaces or \"tab\""
            ))),
        }
    }
}

/// Line terminator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Newline {
    /// `\r\n`
    #[default]
    CrLf,
    /// `\n`
    Lf,
}

impl Newline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
        }
    }
}
