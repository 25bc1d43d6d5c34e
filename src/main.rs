//! # corm CLI Entry Point
//!
//! Parses arguments with clap, sets up logging and routes to the command
//! handlers. Every failure prints one line to stderr and exits with code 1.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use corm::commands;
use corm::config::Layout;

#[derive(Parser)]
#[command(name = "corm")]
#[command(about = "Fetch packages into an isolated root and export a clean vendor tree", version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
struct Cli {
    /// Project directory containing the Cormfile [default: current directory]
    #[arg(short = 'C', long, global = true)]
    project_dir: Option<PathBuf>,
    /// Show debug logging (overridden by CORM_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install packages from the Cormfile into _corm/
    Install,
    /// Export fetched packages to the vendor directory
    Export,
    /// Run a command with the package root pointed at _corm/
    Exec {
        /// Command and its arguments
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Build with the isolated package root
    Build {
        /// Arguments passed to the build tool
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Test with the isolated package root
    Test {
        /// Arguments passed to the test tool
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "corm=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CORM_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn usage() -> ExitCode {
    let _ = Cli::command().print_help();
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = e.print();
                    ExitCode::SUCCESS
                }
                ErrorKind::InvalidSubcommand => usage(),
                _ => {
                    let _ = e.print();
                    ExitCode::FAILURE
                }
            };
        }
    };

    let Some(command) = cli.command else {
        return usage();
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    init_logging(cli.verbose);

    let result = Layout::resolve(cli.project_dir.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|layout| match &command {
            Commands::Install => commands::install::run_install(&layout),
            Commands::Export => commands::export::run_export(&layout),
            Commands::Exec { args } => commands::exec::run_exec(&layout, args),
            Commands::Build { args } => commands::exec::run_tool(&layout, "build", args),
            Commands::Test { args } => commands::exec::run_tool(&layout, "test", args),
            Commands::Completion { .. } => Ok(()),
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "x".red(), e);
            ExitCode::FAILURE
        }
    }
}
