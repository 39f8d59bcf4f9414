// ABOUTME: Entry point for rewardbot — a terminal rewards dashboard with a rule-based assistant.
// ABOUTME: Parses CLI args, sets up file logging, loads config, and launches the app.

use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rewardbot::app::{App, AppOptions, probe};
use rewardbot::config::Config;

#[derive(Debug, Parser)]
#[command(name = "rewardbot", about = "Reward points dashboard and assistant")]
struct Cli {
    /// Answer every question locally; never contact the query service.
    #[arg(long)]
    offline: bool,

    /// Forget the stored login before starting.
    #[arg(long)]
    fresh: bool,

    /// Use this config file instead of ~/.rewardbot/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Check the query service's health and test endpoints, then exit.
    #[arg(long)]
    probe: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let log_path = Config::log_path();
    let file = log_path
        .parent()
        .map(std::fs::create_dir_all)
        .transpose()
        .and_then(|_| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
        });

    match file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        // Without a log file, stay quiet rather than drawing over the TUI.
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load local .env if present, then the per-user one.
    let _ = dotenvy::dotenv();
    let _ = dotenvy::from_path(Config::env_path());

    init_logging();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if cli.probe {
        return probe(&config).await;
    }

    App::new(
        config,
        AppOptions {
            offline: cli.offline,
            fresh: cli.fresh,
        },
    )
    .run()
    .await
}
