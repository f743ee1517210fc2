//! Bake operation - generation from manifest.

use std::path::Path;

use stencil_manifest::StencilToml;

use super::units::run_units;
use crate::{
    output::{OutputFile, WriteResult},
    reports::{BakeReport, FileStatus, GeneratedFile, UnitFailure},
};

/// Options for the bake operation.
pub struct BakeOptions<'a> {
    /// Output directory for generated files.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the bake operation.
///
/// Every unit is attempted; failed units are reported without affecting the
/// files of the others.
pub fn bake(file: &StencilToml, opts: BakeOptions) -> BakeReport {
    let extension = &file.manifest().generator.extension;
    let mut files = Vec::new();
    let mut failures = Vec::new();

    for outcome in run_units(file) {
        let source = match outcome.result {
            Ok(source) => source,
            Err(report) => {
                failures.push(UnitFailure::new(&outcome.type_name, &outcome.hint_name, &report));
                continue;
            }
        };

        let output = OutputFile::new(
            opts.output_dir
                .join(format!("{}{}", source.hint_name, extension)),
            source.content,
        );

        if opts.dry_run {
            files.push(GeneratedFile {
                path: output.path().to_path_buf(),
                status: FileStatus::Preview,
                content: Some(output.content().to_string()),
            });
            continue;
        }

        match output.write() {
            Ok(result) => files.push(GeneratedFile {
                path: output.path().to_path_buf(),
                status: match result {
                    WriteResult::Written => FileStatus::Written,
                    WriteResult::Unchanged => FileStatus::Unchanged,
                },
                content: None,
            }),
            Err(e) => {
                let report = miette::miette!(
                    "failed to write '{}': {e}",
                    output.path().display()
                );
                failures.push(UnitFailure::new(&outcome.type_name, &outcome.hint_name, &report));
            }
        }
    }

    BakeReport {
        output_dir: opts.output_dir.to_path_buf(),
        dry_run: opts.dry_run,
        files,
        failures,
    }
}
