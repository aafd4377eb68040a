//! navcheck CLI - Navigation link checker for documentation sites.
//!
//! Provides commands for:
//! - `check`: Report broken navigation links and orphan pages
//! - `tree`: Print the navigation tree with unresolved links marked

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, TreeArgs};
use output::Output;

/// navcheck - Navigation link checker for documentation sites.
#[derive(Parser)]
#[command(name = "navcheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check navigation links and report orphan pages.
    Check(CheckArgs),
    /// Print the navigation tree.
    Tree(TreeArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Check(args) => args.source.verbose,
            Self::Tree(args) => args.source.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
