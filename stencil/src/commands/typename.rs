use clap::Args;
use eyre::Result;
use stencil_codegen::{TypeDesc, TypeNameFormatter, TypeNameMode};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct TypenameCommand {
    /// Type descriptor, e.g. `System.Collections.Generic.Dictionary<string, int[]>`
    #[arg(value_name = "TYPE")]
    pub ty: String,

    /// Include namespaces
    #[arg(long)]
    pub qualified: bool,

    /// Namespace treated as imported (repeatable)
    #[arg(short = 'u', long = "using", value_name = "NS")]
    pub usings: Vec<String>,
}

impl TypenameCommand {
    pub fn run(&self) -> Result<()> {
        let ty = TypeDesc::parse(&self.ty).unwrap_or_exit();
        let formatter = TypeNameFormatter::new().with_available_namespaces(&self.usings);
        let mode = if self.qualified {
            TypeNameMode::Qualified
        } else {
            TypeNameMode::Unqualified
        };
        println!("{}", formatter.format(&ty, mode));
        Ok(())
    }
}
