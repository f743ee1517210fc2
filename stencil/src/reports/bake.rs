//! Bake command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct BakeReport {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Whether files were only previewed.
    pub dry_run: bool,
    /// Files generated by successful units.
    pub files: Vec<GeneratedFile>,
    /// Units that failed.
    pub failures: Vec<UnitFailure>,
}

#[derive(Debug)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub status: FileStatus,
    /// Content, kept for previews.
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Written,
    Unchanged,
    Preview,
}

/// A unit that did not produce output.
#[derive(Debug, Serialize)]
pub struct UnitFailure {
    pub type_name: String,
    pub hint_name: String,
    /// One-line error message.
    pub message: String,
    /// Full diagnostic, with source context when available.
    #[serde(skip)]
    pub rendered: String,
}

impl UnitFailure {
    pub fn new(type_name: &str, hint_name: &str, report: &miette::Report) -> Self {
        Self {
            type_name: type_name.to_string(),
            hint_name: hint_name.to_string(),
            message: report.to_string(),
            rendered: format!("{report:?}"),
        }
    }
}

impl BakeReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }
}

impl Report for BakeReport {
    fn render(&self, out: &mut dyn Output) {
        for failure in &self.failures {
            out.error(&failure.rendered);
        }

        if self.dry_run {
            for file in &self.files {
                out.divider(&file.path.display().to_string());
                out.preformatted(file.content.as_deref().unwrap_or_default());
            }
            out.divider("Summary");
            out.preformatted(&format!("{} files would be generated", self.files.len()));
        } else {
            out.key_value("Generated", &self.output_dir.display().to_string());
            for file in &self.files {
                let name = file
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                match file.status {
                    FileStatus::Written => out.added_item(&name),
                    _ => out.list_item(&format!("{name} (unchanged)")),
                }
            }
            out.newline();
            out.preformatted(&format!(
                "{} written, {} unchanged",
                self.count(FileStatus::Written),
                self.count(FileStatus::Unchanged)
            ));
        }

        if !self.failures.is_empty() {
            out.newline();
            out.section(&format!("Failed ({})", self.failures.len()));
            for failure in &self.failures {
                out.list_item(&format!("{}: {}", failure.hint_name, failure.message));
            }
        }
    }
}
