//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod check;
pub mod config;
pub mod extract;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Pseudo-point sampler for H3 hexagon annotations
#[derive(Parser)]
#[command(name = "pseudo-points")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sample pseudo-points for every annotation row and write them out
    Extract(extract::ExtractArgs),

    /// Check sampler output against its expected distribution
    Check(check::CheckArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Initialize logging to stderr, honoring RUST_LOG
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI
pub fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract(args) => extract::run(args),
        Commands::Check(args) => check::run(args),
        Commands::Config(args) => config::run(args),
    }
}
