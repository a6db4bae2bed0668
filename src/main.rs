use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use gridstake::config::AppConfig;
use gridstake::server;
use gridstake::state::AppState;

/// Token staking service
#[derive(Debug, Parser)]
#[command(name = "gridstake", version, about)]
struct Args {
    /// Path to a TOML configuration file. Falls back to environment
    /// variables when absent.
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::load_with_optional_file(args.config.as_ref())
        .map_err(|e| anyhow::anyhow!("configuration error: {e}"))?;

    tracing::info!(
        grid_charge_target = config.staking.grid_charge_target,
        verification_enabled = config.verification.enabled,
        "starting staking service"
    );

    let state = AppState::from_config(&config);
    server::serve(&config, state).await
}
