use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::Args;
use eyre::{Context, Result};
use stencil_codegen::Newline;
use stencil_core::{Constants, Template};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct TransformCommand {
    /// Template file to filter
    pub template: PathBuf,

    /// Enable a constant (repeatable; also accepts comma-separated lists)
    #[arg(short = 'D', long = "define", value_name = "NAME")]
    pub defines: Vec<String>,

    /// Terminate lines with LF instead of CRLF
    #[arg(long)]
    pub lf: bool,
}

impl TransformCommand {
    pub fn run(&self) -> Result<()> {
        let constants = self
            .defines
            .iter()
            .fold(Constants::new(), |acc, list| acc.union(&Constants::parse_list(list)));
        let template = Template::open(&self.template).unwrap_or_exit();
        let output = template.render(&constants).unwrap_or_exit();

        let newline = if self.lf { Newline::Lf } else { Newline::CrLf };
        io::stdout()
            .write_all(output.join(newline.as_str()).as_bytes())
            .wrap_err("Failed to write output")?;
        Ok(())
    }
}
