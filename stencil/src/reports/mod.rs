//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod bake;
mod check;
mod output;

pub use bake::{BakeReport, FileStatus, GeneratedFile, UnitFailure};
pub use check::{CheckReport, UnitStatus};
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Report, TerminalOutput};
