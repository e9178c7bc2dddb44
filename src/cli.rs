use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tsvar vector-autoregression toolkit.
#[derive(Parser)]
#[command(
    name = "tsvar",
    version,
    about = "Vector autoregression estimation, forecasting and inference"
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
    /// Simulate the configured process, estimate a VAR and write a JSON report.
    Run(RunArgs),
    /// Analyse the configured process without simulating.
    Describe(DescribeArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "tsvar.toml")]
    pub config: PathBuf,

    /// Override output JSON path from config (stdout when unset).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override simulation RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `describe` subcommand.
#[derive(clap::Args)]
pub struct DescribeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "tsvar.toml")]
    pub config: PathBuf,

    /// Override output JSON path from config (stdout when unset).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
