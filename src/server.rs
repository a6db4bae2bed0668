//! HTTP server
//!
//! Builds the axum router over [`AppState`] and runs the listener until
//! ctrl-c. All staking rules live in the domain services; this module only
//! wires routes to handlers.

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;

use crate::config::AppConfig;
use crate::handlers::stakes;
use crate::state::AppState;

/// Build the complete axum router.
///
/// Routes:
/// - `POST /api/stakes` - open a stake
/// - `POST /api/stakes/:id/claim` - claim accrued rewards
/// - `POST /api/stakes/:id/unstake` - close a stake
/// - `GET  /api/stakes/:owner` - active stakes for a wallet, enriched
/// - `GET  /api/pool` - pool aggregates and boost state
/// - `GET  /api/leaderboard` - top stakers by active principal
/// - `GET  /api/users/:owner/stats` - per-wallet aggregates
/// - `GET  /health` - liveness probe
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/stakes", post(stakes::create_stake))
        .route("/api/stakes/:id/claim", post(stakes::claim_rewards))
        .route("/api/stakes/:id/unstake", post(stakes::unstake))
        .route("/api/stakes/:owner", get(stakes::user_stakes))
        .route("/api/pool", get(stakes::pool_stats))
        .route("/api/leaderboard", get(stakes::leaderboard))
        .route("/api/users/:owner/stats", get(stakes::user_stats))
        .route("/health", get(stakes::health))
        .with_state(state)
}

/// Bind the configured address and serve until ctrl-c.
pub async fn serve(config: &AppConfig, state: AppState) -> Result<()> {
    let addr = format!(
        "{}:{}",
        config.network.http_bind_addr, config.network.http_port
    );
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "staking API listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
