// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # HAVEN Ledger Node
//!
//! Entry point for the `haven-node` binary. Parses CLI arguments,
//! initializes logging and metrics, restores the ledger snapshot, and
//! serves the REST API.
//!
//! The binary supports four subcommands:
//!
//! - `run`     — start the ledger node
//! - `init`    — initialize the data directory and write a default config
//! - `status`  — query a running node's status endpoint
//! - `version` — print build version information

mod api;
mod cli;
mod logging;
mod metrics;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::signal;

use haven_collab::scoring::ScoreBoard;
use haven_ledger::{Account, LedgerConfig, StakingLedger};

use cli::{Commands, HavenNodeCli};
use logging::LogFormat;
use metrics::NodeMetrics;

/// Configuration file name inside the data directory.
const CONFIG_FILE: &str = "config.json";

/// Ledger snapshot file name inside the data directory.
const SNAPSHOT_FILE: &str = "ledger.json";

/// On-disk node configuration.
#[derive(Debug, Serialize, Deserialize)]
struct NodeConfig {
    /// Administrator account for governance operations.
    admin: String,
    /// Yield rate in basis points for new stakes.
    rate_bps: u32,
    /// Minimum admissible principal.
    min_stake: u64,
    /// Maximum admissible principal.
    max_stake: u64,
    /// Maximum number of rows kept on the scoring leaderboard.
    leaderboard_capacity: usize,
}

impl NodeConfig {
    fn default_with_admin(admin: &str) -> Self {
        Self {
            admin: admin.to_string(),
            rate_bps: 300,
            min_stake: 100,
            max_stake: 1_000_000_000,
            leaderboard_capacity: 100,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = HavenNodeCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Init(args) => init_node(args),
        Commands::Status(args) => query_status(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Starts the full ledger node: API server and metrics endpoint.
async fn run_node(args: cli::RunArgs) -> Result<()> {
    logging::init_logging(
        "haven_node=info,haven_ledger=info,tower_http=info",
        LogFormat::from_env(),
    );

    tracing::info!(
        api_port = args.api_port,
        metrics_port = args.metrics_port,
        data_dir = %args.data_dir.display(),
        "starting haven-node"
    );

    // --- Configuration ---
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| args.data_dir.join(CONFIG_FILE));
    let config = load_config(&config_path)?;

    // --- Scoring collaborator ---
    let board = Arc::new(ScoreBoard::new(config.leaderboard_capacity));

    // --- Ledger (snapshot restore or fresh) ---
    let snapshot_path = args.data_dir.join(SNAPSHOT_FILE);
    let ledger = Arc::new(load_ledger(&snapshot_path, &config, Arc::clone(&board))?);

    // --- Metrics ---
    let node_metrics = Arc::new(NodeMetrics::new());
    node_metrics
        .total_staked
        .set(ledger.total_staked_global() as i64);
    node_metrics
        .active_stakes
        .set(ledger.active_stakes() as i64);

    // --- Application state ---
    let app_state = api::AppState {
        version: env!("CARGO_PKG_VERSION").to_string(),
        ledger: Arc::clone(&ledger),
        board,
        metrics: Arc::clone(&node_metrics),
        started_at: chrono::Utc::now(),
    };

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = format!("0.0.0.0:{}", args.api_port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind API listener on {}", api_addr))?;
    tracing::info!("API server listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&node_metrics));
    let metrics_addr = format!("0.0.0.0:{}", args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("Metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    // Persist the book so the next start resumes where this one left off.
    save_snapshot(&snapshot_path, &ledger)?;
    tracing::info!("haven-node stopped");
    Ok(())
}

/// Reads and parses the node configuration file.
fn load_config(path: &Path) -> Result<NodeConfig> {
    let raw = std::fs::read(path).with_context(|| {
        format!(
            "failed to read config at {} (run `haven-node init` first?)",
            path.display()
        )
    })?;
    serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse config at {}", path.display()))
}

/// Restores the ledger from a snapshot if one exists, otherwise builds a
/// fresh one from the configuration.
fn load_ledger(
    snapshot_path: &Path,
    config: &NodeConfig,
    board: Arc<ScoreBoard>,
) -> Result<StakingLedger> {
    if snapshot_path.exists() {
        let raw = std::fs::read(snapshot_path)
            .with_context(|| format!("failed to read snapshot at {}", snapshot_path.display()))?;
        let book = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse snapshot at {}", snapshot_path.display()))?;
        let ledger = StakingLedger::from_snapshot(book, board);
        tracing::info!(
            path = %snapshot_path.display(),
            total_staked = ledger.total_staked_global(),
            active_stakes = ledger.active_stakes(),
            "ledger restored from snapshot"
        );
        Ok(ledger)
    } else {
        let ledger = StakingLedger::new(
            LedgerConfig {
                admin: Account::new(config.admin.as_str()),
                rate_bps: config.rate_bps,
                min_stake: config.min_stake,
                max_stake: config.max_stake,
            },
            board,
        )
        .context("invalid ledger configuration")?;
        tracing::info!("fresh ledger initialized");
        Ok(ledger)
    }
}

/// Writes the ledger book to the snapshot file.
fn save_snapshot(path: &Path, ledger: &StakingLedger) -> Result<()> {
    let book = ledger.export_snapshot();
    let raw = serde_json::to_vec_pretty(&book).context("failed to serialize ledger snapshot")?;
    std::fs::write(path, raw)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    tracing::info!(path = %path.display(), "ledger snapshot saved");
    Ok(())
}

/// Initializes a new node data directory with a default configuration.
fn init_node(args: cli::InitArgs) -> Result<()> {
    logging::init_logging("haven_node=info", LogFormat::from_env());

    let data_dir = &args.data_dir;
    tracing::info!(data_dir = %data_dir.display(), admin = %args.admin, "initializing node");

    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create data directory: {}", data_dir.display()))?;

    let config_path = data_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "config already exists at {}; remove it to re-initialize",
            config_path.display()
        );
    }

    let config = NodeConfig::default_with_admin(&args.admin);
    let raw = serde_json::to_vec_pretty(&config).context("failed to serialize default config")?;
    std::fs::write(&config_path, raw)
        .with_context(|| format!("failed to write config to {}", config_path.display()))?;

    println!("Node initialized successfully.");
    println!("  Data directory : {}", data_dir.display());
    println!("  Config         : {}", config_path.display());
    println!("  Admin account  : {}", args.admin);

    Ok(())
}

/// Queries a running node's status endpoint and prints the result.
async fn query_status(args: cli::StatusArgs) -> Result<()> {
    let url = format!("{}/status", args.api_url.trim_end_matches('/'));
    let body: String = http_get(&url).await?;
    println!("{}", body);
    Ok(())
}

/// Minimal HTTP GET without pulling in `reqwest` as a dependency.
/// In a real deployment, swap this for a proper HTTP client.
async fn http_get(url: &str) -> Result<String> {
    // Use tokio's TCP stream + raw HTTP/1.1 to avoid adding reqwest.
    let parsed: url::Url = url
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid URL: {}", e))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("missing host in URL"))?;
    let port = parsed.port().unwrap_or(80);
    let path = parsed.path();

    let addr = format!("{}:{}", host, port);
    let mut stream = tokio::net::TcpStream::connect(&addr)
        .await
        .with_context(|| format!("failed to connect to {}", addr))?;

    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, host,
    );

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    stream.write_all(request.as_bytes()).await?;
    stream.shutdown().await?;

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    let response = String::from_utf8_lossy(&buf);

    // Strip HTTP headers — everything after the first blank line is the body.
    let body = response
        .split_once("\r\n\r\n")
        .map(|(_, b)| b.to_string())
        .unwrap_or_else(|| response.to_string());

    Ok(body)
}

/// Prints version information to stdout.
fn print_version() {
    println!("haven-node {}", env!("CARGO_PKG_VERSION"));
    println!("rustc      {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Minimal URL parser — just enough to extract host/port/path.
/// Avoids pulling in the `url` crate for a single use.
mod url {
    pub struct Url {
        host: String,
        port: Option<u16>,
        path: String,
    }

    impl Url {
        pub fn host_str(&self) -> Option<&str> {
            Some(&self.host)
        }

        pub fn port(&self) -> Option<u16> {
            self.port
        }

        pub fn path(&self) -> &str {
            &self.path
        }
    }

    impl std::str::FromStr for Url {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            // Strip scheme.
            let rest = s
                .strip_prefix("http://")
                .or_else(|| s.strip_prefix("https://"))
                .unwrap_or(s);

            let (authority, path) = match rest.find('/') {
                Some(i) => (&rest[..i], &rest[i..]),
                None => (rest, "/"),
            };

            let (host, port) = match authority.rfind(':') {
                Some(i) => {
                    let p = authority[i + 1..]
                        .parse::<u16>()
                        .map_err(|e| format!("bad port: {}", e))?;
                    (authority[..i].to_string(), Some(p))
                }
                None => (authority.to_string(), None),
            };

            Ok(Url {
                host,
                port,
                path: path.to_string(),
            })
        }
    }
}
