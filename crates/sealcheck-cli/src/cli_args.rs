use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sealcheck_core::config::DefaultArmPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "sealcheck",
    version,
    about = "Exhaustiveness checking for type switches over sealed Go interfaces"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Print progress and summary lines on stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Check every type switch over a sealed interface
    Check {
        /// Root of the Go source tree (default: current directory)
        path: Option<PathBuf>,
        /// Also analyze _test.go files
        #[arg(long)]
        include_tests: bool,
        /// How default arms are classified (overrides sealcheck.json)
        #[arg(long, value_enum)]
        default_arm: Option<DefaultArmArg>,
    },

    /// List sealed interfaces with their variants
    Facts {
        /// Root of the Go source tree (default: current directory)
        path: Option<PathBuf>,
        /// Also analyze _test.go files
        #[arg(long)]
        include_tests: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, elvish, powershell)
        shell: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DefaultArmArg {
    /// The final statement of the arm decides
    LastStatement,
    /// The arm must be a single guarding statement
    SoleStatement,
}

impl From<DefaultArmArg> for DefaultArmPolicy {
    fn from(arg: DefaultArmArg) -> Self {
        match arg {
            DefaultArmArg::LastStatement => DefaultArmPolicy::LastStatement,
            DefaultArmArg::SoleStatement => DefaultArmPolicy::SoleStatement,
        }
    }
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
