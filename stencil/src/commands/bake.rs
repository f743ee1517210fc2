use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use stencil_manifest::StencilToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, BakeOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BakeCommand {
    /// Path to stencil.toml (defaults to ./stencil.toml)
    #[arg(short, long, default_value = "stencil.toml")]
    pub config: PathBuf,

    /// Output directory (overrides the generator.output setting)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl BakeCommand {
    /// Run the bake command
    pub fn run(&self) -> Result<()> {
        let file = StencilToml::open(&self.config).unwrap_or_exit();
        let output_dir = file.output_dir(self.output.as_deref());

        let report = ops::bake(
            &file,
            BakeOptions {
                output_dir: &output_dir,
                dry_run: self.dry_run,
            },
        );
        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            eyre::bail!(
                "{} of {} types failed to generate",
                report.failures.len(),
                report.failures.len() + report.files.len()
            );
        }
        Ok(())
    }
}
