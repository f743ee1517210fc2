//! Check command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::{
    UnitFailure,
    output::{Output, Report},
};

/// Report data from a dry generation run.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Every unit that generated successfully.
    pub units: Vec<UnitStatus>,
    /// Every unit that failed.
    pub failures: Vec<UnitFailure>,
}

#[derive(Debug, Serialize)]
pub struct UnitStatus {
    pub type_name: String,
    pub template: String,
    pub hint_name: String,
    /// Number of generated lines.
    pub lines: usize,
}

impl CheckReport {
    /// Whether every unit generated.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for failure in &self.failures {
            out.error(&failure.rendered);
        }

        out.section(&format!(
            "{} unit{}",
            self.units.len() + self.failures.len(),
            if self.units.len() + self.failures.len() == 1 { "" } else { "s" }
        ));
        for unit in &self.units {
            out.list_item(&format!(
                "{} ({}, {} lines)",
                unit.hint_name, unit.template, unit.lines
            ));
        }
        for failure in &self.failures {
            out.list_item(&format!("{} failed: {}", failure.hint_name, failure.message));
        }
        out.newline();

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        } else {
            out.preformatted(&format!(
                "✗ {} of {} units failed",
                self.failures.len(),
                self.units.len() + self.failures.len()
            ));
        }
    }
}
