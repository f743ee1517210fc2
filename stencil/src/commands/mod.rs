mod bake;
mod check;
mod completions;
mod transform;
mod typename;

use bake::BakeCommand;
use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use transform::TransformCommand;
use typename::TypenameCommand;

/// Extension trait for exiting on diagnostics with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for stencil_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => exit_with(miette::Report::new(*e)),
        }
    }
}

impl<T> UnwrapOrExit<T> for stencil_core::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => exit_with(miette::Report::new(*e)),
        }
    }
}

impl<T> UnwrapOrExit<T> for Result<T, stencil_codegen::TypeParseError> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => exit_with(miette::Report::new(e)),
        }
    }
}

fn exit_with(report: miette::Report) -> ! {
    eprintln!("{report:?}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "stencil")]
#[command(version)]
#[command(about = "Generate source files from conditional templates")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Bake(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Transform(cmd) => cmd.run(),
            Commands::Typename(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every type declared in stencil.toml
    Bake(BakeCommand),

    /// Run every generation unit without writing files
    Check(CheckCommand),

    /// Print a template filtered for a set of constants
    Transform(TransformCommand),

    /// Render a type descriptor as a type expression
    Typename(TypenameCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["stencil", "typename", "int", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_transform_defines() {
        let cli =
            Cli::try_parse_from(["stencil", "transform", "a.tmpl", "-D", "A", "-D", "B", "--lf"])
                .unwrap();
        let Commands::Transform(cmd) = cli.command else {
            panic!("expected transform");
        };
        assert_eq!(cmd.defines, ["A", "B"]);
        assert!(cmd.lf);
    }
}
