//! bt CLI - streaming byte template engine.
//!
//! Provides commands for:
//! - `render`: Render a template against a JSON document
//! - `directives`: List the built-in directives

mod commands;
mod error;
mod fetch;
mod output;

use std::error::Error as _;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DirectivesArgs, RenderArgs};
use output::Output;

/// bt - streaming byte template engine.
#[derive(Parser)]
#[command(name = "bt", version, about)]
struct Cli {
    /// Enable verbose output (debug logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template against a JSON document.
    Render(RenderArgs),
    /// List the built-in directives.
    Directives(DirectivesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Directives(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        let mut source = err.source();
        while let Some(cause) = source {
            output.error(&format!("  caused by: {cause}"));
            source = cause.source();
        }
        std::process::exit(1);
    }
}
