//! Staking API handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::stake_commands::StakeRequest;
use crate::handlers::ApiError;
use crate::state::AppState;

/// Stake creation request body
#[derive(Debug, Deserialize)]
pub struct CreateStakeBody {
    pub owner: String,
    pub amount: u64,
    pub lock_period_days: u32,
    /// Optional transaction signature for the verification gate.
    pub proof_ref: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateStakeResponse {
    pub stake_id: Uuid,
}

/// POST /api/stakes
pub async fn create_stake(
    State(state): State<AppState>,
    Json(body): Json<CreateStakeBody>,
) -> Result<impl IntoResponse, ApiError> {
    let stake_id = state
        .commands()
        .create_stake(StakeRequest {
            owner: body.owner,
            principal: body.amount,
            lock_period_days: body.lock_period_days,
            proof_ref: body.proof_ref,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreateStakeResponse { stake_id })))
}

/// Owner identification for mutations (authentication is upstream; the
/// body names the wallet the caller claims to act for).
#[derive(Debug, Deserialize)]
pub struct OwnerBody {
    pub owner: String,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub amount: u64,
}

/// POST /api/stakes/{id}/claim
pub async fn claim_rewards(
    State(state): State<AppState>,
    Path(stake_id): Path<Uuid>,
    Json(body): Json<OwnerBody>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let amount = state.commands().claim_rewards(stake_id, &body.owner).await?;
    Ok(Json(ClaimResponse { amount }))
}

#[derive(Debug, Serialize)]
pub struct UnstakeResponse {
    pub principal: u64,
    pub unclaimed_rewards: u64,
}

/// POST /api/stakes/{id}/unstake
pub async fn unstake(
    State(state): State<AppState>,
    Path(stake_id): Path<Uuid>,
    Json(body): Json<OwnerBody>,
) -> Result<Json<UnstakeResponse>, ApiError> {
    let outcome = state.commands().unstake(stake_id, &body.owner).await?;
    Ok(Json(UnstakeResponse {
        principal: outcome.principal,
        unclaimed_rewards: outcome.unclaimed_rewards,
    }))
}

/// GET /api/stakes/{owner}
pub async fn user_stakes(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let stakes = state.queries().get_user_stakes(&owner).await?;
    Ok(Json(stakes))
}

/// GET /api/pool
pub async fn pool_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.queries().pool_stats().await?;
    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<usize>,
}

/// GET /api/leaderboard
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = params.limit.unwrap_or_else(|| state.leaderboard_limit());
    let entries = state.queries().leaderboard(limit).await?;
    Ok(Json(entries))
}

/// GET /api/users/{owner}/stats
pub async fn user_stats(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.queries().user_stats(&owner).await?;
    Ok(Json(stats))
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
