//! sealcheck CLI: exhaustiveness checking for type switches over sealed Go
//! interfaces.
//!
//! This binary provides the `sealcheck` command with subcommands for checking
//! a source tree and listing its sealed interfaces. See `sealcheck --help`.

use clap::Parser;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let formatter: Box<dyn sealcheck_output::OutputFormatter> = if cli.json {
        Box::new(sealcheck_output::json::JsonFormatter)
    } else {
        Box::new(sealcheck_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Check {
            path,
            include_tests,
            default_arm,
        } => commands::check::run(
            &*formatter,
            cli.verbose,
            path,
            include_tests,
            default_arm.map(Into::into),
        ),
        Commands::Facts { path, include_tests } => {
            commands::facts::run(&*formatter, cli.verbose, path, include_tests)
        }
        Commands::Completion { shell } => commands::completion::run(&shell),
    };

    std::process::exit(exit_code);
}
