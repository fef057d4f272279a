//! # CLI Interface
//!
//! Defines the command-line argument structure for `haven-node` using
//! `clap` derive. Supports four subcommands: `run`, `init`, `status`,
//! and `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HAVEN custody ledger node.
///
/// Serves the staking ledger over a REST API, mirrors staking activity
/// into the scoring leaderboard, and exposes Prometheus metrics.
#[derive(Parser, Debug)]
#[command(
    name = "haven-node",
    about = "HAVEN custody ledger service node",
    version,
    propagate_version = true
)]
pub struct HavenNodeCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the HAVEN node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the ledger node.
    Run(RunArgs),
    /// Initialize a new node — creates the data directory and writes a
    /// default configuration file.
    Init(InitArgs),
    /// Query the status of a running node via its API endpoint.
    Status(StatusArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the node configuration file (JSON).
    ///
    /// When omitted, the node looks for `config.json` in the data directory.
    #[arg(long, short = 'c', env = "HAVEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the node data directory where the config and ledger
    /// snapshot are stored.
    #[arg(long, short = 'd', env = "HAVEN_DATA_DIR", default_value = "~/.haven")]
    pub data_dir: PathBuf,

    /// Port for the REST API.
    #[arg(long, env = "HAVEN_API_PORT", default_value_t = 9641)]
    pub api_port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "HAVEN_METRICS_PORT", default_value_t = 9642)]
    pub metrics_port: u16,
}

/// Arguments for the `init` subcommand.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Path to the data directory to initialize.
    #[arg(long, short = 'd', env = "HAVEN_DATA_DIR", default_value = "~/.haven")]
    pub data_dir: PathBuf,

    /// Administrator account for governance operations.
    #[arg(long, default_value = "hvn:admin")]
    pub admin: String,
}

/// Arguments for the `status` subcommand.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// API endpoint of the running node.
    #[arg(long, default_value = "http://127.0.0.1:9641")]
    pub api_url: String,
}
