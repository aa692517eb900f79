use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tlaloc flood-rainfall forecast verification.
#[derive(Parser)]
#[command(
    name = "tlaloc",
    version,
    about = "Probabilistic verification of ensemble rainfall forecasts against flood reports"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute FB and AROC with bootstrapped confidence intervals.
    Verify(VerifyArgs),
}

/// Arguments for the `verify` subcommand.
#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "tlaloc.toml")]
    pub config: PathBuf,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override bootstrap RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Include the full bootstrap distributions in the JSON output.
    #[arg(long)]
    pub full_distributions: bool,
}
