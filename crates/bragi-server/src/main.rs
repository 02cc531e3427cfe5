use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use bragi_core::api::SAVE_PATH;
use bragi_infrastructure::{ConfigService, JsonDirScenarioRepository};
use bragi_server::{AppState, logging, serve};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bragi-server")]
#[command(about = "Scenario persistence server for Bragi")]
struct Cli {
    /// Path to a config.toml (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// TCP address to bind the web server
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Directory holding one JSON file per scenario
    #[arg(long)]
    scenarios_dir: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigService::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if cli.scenarios_dir.is_some() {
        config.scenarios_dir = cli.scenarios_dir;
    }
    if cli.log_dir.is_some() {
        config.log_dir = cli.log_dir;
    }

    let _log_guard = logging::init_logging(config.log_dir.as_deref())
        .context("Failed to initialize logging")?;

    let scenarios_dir = config.resolved_scenarios_dir()?;
    let repository = JsonDirScenarioRepository::new(&scenarios_dir).await?;
    info!("Storing scenarios in {}", repository.base_dir().display());

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    info!("Server is running on http://{}", config.bind);
    info!("Waiting for POST requests to {}...", SAVE_PATH);

    serve(listener, AppState::new(Arc::new(repository)))
        .await
        .context("Server error")
}
