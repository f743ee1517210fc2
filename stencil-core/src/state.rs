//! The conditional automaton.
//!
//! Only a single level of conditional group is supported. The legal
//! transitions are:
//!
//! | Directive | Illegal when current mode is |
//! |-----------|------------------------------|
//! | `#if`     | anything but `None`          |
//! | `#elif`   | anything but `If`            |
//! | `#else`   | `None` or `Else`             |
//! | `#endif`  | `None`                       |
//!
//! A group therefore holds at most one `#elif`.

use std::fmt;

use tracing::trace;

use crate::Keyword;

/// Which branch of the open conditional group is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// No group is open.
    #[default]
    None,
    If,
    ElseIf,
    Else,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::None => "None",
            Mode::If => "If",
            Mode::ElseIf => "ElseIf",
            Mode::Else => "Else",
        })
    }
}

/// A live directive met in a mode that does not allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalTransition {
    pub directive: Keyword,
    pub mode: Mode,
}

impl fmt::Display for IllegalTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected {} in {} mode", self.directive, self.mode)
    }
}

/// Branch mode and emit flag of the single open conditional group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalState {
    mode: Mode,
    enabled: bool,
}

impl ConditionalState {
    pub fn new() -> Self {
        Self {
            mode: Mode::None,
            enabled: true,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether content lines are currently emitted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether no group is open.
    pub fn is_closed(&self) -> bool {
        self.mode == Mode::None
    }

    /// Open a group with the result of the `#if` condition.
    pub fn enter_if(&mut self, condition: bool) -> Result<(), IllegalTransition> {
        self.require(Keyword::If, |mode| mode == Mode::None)?;
        self.enabled = condition;
        self.mode = Mode::If;
        self.log(Keyword::If);
        Ok(())
    }

    /// Switch to the `#elif` branch.
    ///
    /// The branch is only enabled when the `#if` branch was not.
    pub fn enter_elif(&mut self, condition: bool) -> Result<(), IllegalTransition> {
        self.require(Keyword::ElseIf, |mode| mode == Mode::If)?;
        self.enabled = !self.enabled && condition;
        self.mode = Mode::ElseIf;
        self.log(Keyword::ElseIf);
        Ok(())
    }

    /// Switch to the `#else` branch.
    pub fn enter_else(&mut self) -> Result<(), IllegalTransition> {
        self.require(Keyword::Else, |mode| {
            matches!(mode, Mode::If | Mode::ElseIf)
        })?;
        self.enabled = !self.enabled;
        self.mode = Mode::Else;
        self.log(Keyword::Else);
        Ok(())
    }

    /// Close the open group.
    pub fn exit(&mut self) -> Result<(), IllegalTransition> {
        self.require(Keyword::EndIf, |mode| mode != Mode::None)?;
        self.enabled = true;
        self.mode = Mode::None;
        self.log(Keyword::EndIf);
        Ok(())
    }

    fn require(
        &self,
        directive: Keyword,
        legal: impl FnOnce(Mode) -> bool,
    ) -> Result<(), IllegalTransition> {
        if legal(self.mode) {
            Ok(())
        } else {
            Err(IllegalTransition {
                directive,
                mode: self.mode,
            })
        }
    }

    fn log(&self, directive: Keyword) {
        trace!(%directive, mode = %self.mode, enabled = self.enabled, "conditional transition");
    }
}

impl Default for ConditionalState {
    fn default() -> Self {
        Self::new()
    }
}
