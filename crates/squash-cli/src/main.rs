//! Squash CLI - command-line front end for the squash compressor.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "squash")]
#[command(author, version, about = "Squash dynamic range compressor CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress an audio file
    Process(commands::process::ProcessArgs),

    /// List compressor parameters
    Params(commands::params::ParamsArgs),

    /// Print the static input/output curve
    Curve(commands::curve::CurveArgs),

    /// Generate test signals
    Generate(commands::generate::GenerateArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for tables
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Curve(args) => commands::curve::run(args),
        Commands::Generate(args) => commands::generate::run(args),
    }
}
