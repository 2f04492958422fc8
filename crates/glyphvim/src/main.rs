//! glyphvim - a GUI front-end for the host editor's external UI protocol.
//!
//! The binary drives the UI core headlessly: `replay` feeds recorded
//! notifications through a workspace and prints what it publishes,
//! `buffers` opens the buffer switcher against a recorded buffer list.

mod buffers;
mod replay;
mod surface;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "glyphvim", version, about = "Headless tools for the glyphvim UI core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay newline-delimited `[method, params]` notifications and print
    /// every channel publication as a JSON line.
    Replay {
        /// Recorded notifications, one JSON array per line.
        file: PathBuf,
    },
    /// Open the buffer switcher on a recorded buffer list and print its rows.
    Buffers {
        /// Working directory the host reports.
        #[arg(long)]
        cwd: String,
        /// JSON array of `{name, cur, mod}` objects.
        file: PathBuf,
        /// Filter text typed into the switcher.
        #[arg(long)]
        filter: Option<String>,
    },
}

/// Create the config directory (cross-platform).
fn init_paths() -> Result<()> {
    let config_dir = glyphvim_paths::config_dir();
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
    debug!("Initialized paths - config: {:?}", config_dir);
    Ok(())
}

/// Check if debug mode is enabled via environment variable.
fn is_debug_mode() -> bool {
    std::env::var("GLYPHVIM_DEBUG").is_ok()
}

/// Initialize the logging system. Logs go to stderr; stdout carries output.
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_filter = if is_debug_mode() {
        "glyphvim=trace,ui_events=trace,glyphvim_workspace=trace,dispatch=trace,info"
    } else {
        "glyphvim=info,warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    if is_debug_mode() {
        info!(
            "glyphvim v{} starting up (DEBUG MODE ENABLED)",
            env!("CARGO_PKG_VERSION")
        );
    } else {
        debug!("glyphvim v{} starting up", env!("CARGO_PKG_VERSION"));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    init_paths()?;

    if let Some(path) = settings::ensure_config_file() {
        debug!("Using config {:?}", path);
    }
    let config = settings::load_config();

    match cli.command {
        Command::Replay { file } => replay::run(&file, &config),
        Command::Buffers { cwd, file, filter } => {
            buffers::run(&file, cwd, filter, &config).await
        }
    }
}
