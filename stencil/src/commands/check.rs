use std::path::PathBuf;

use clap::{Args, ValueEnum};
use eyre::{Context, Result};
use stencil_manifest::StencilToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Args)]
pub struct CheckCommand {
    /// Path to stencil.toml (defaults to ./stencil.toml)
    #[arg(short, long, default_value = "stencil.toml")]
    pub config: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: Format,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let file = StencilToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(&file);

        match self.format {
            Format::Text => report.render(&mut TerminalOutput::new()),
            Format::Json => {
                let json =
                    serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
                println!("{json}");
            }
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
