//! Stake query service - handles reads (queries)
//!
//! Read-only views over the ledger: per-owner stake listings enriched with
//! computed reward data, pool statistics, the leaderboard, and per-user
//! totals. Queries never modify state and take no per-stake locks; a view
//! computed a few hundred milliseconds stale is acceptable.

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::Clock;
use crate::constants::SECONDS_PER_DAY;
use crate::domain::errors::{StakeError, StakeResult};
use crate::domain::pool::{self, PoolSnapshot};
use crate::domain::rewards;
use crate::domain::stake::{LeaderboardEntry, Stake};
use crate::repositories::LedgerRepository;

/// A stake enriched with computed reward and progress data for display.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedStake {
    #[serde(flatten)]
    pub stake: Stake,
    /// Total accrual from start through now under the current boost flag.
    pub total_rewards: u64,
    pub unclaimed_rewards: u64,
    pub days_staked: i64,
    pub days_remaining: i64,
    /// Lock-period progress, clamped to [0, 100].
    pub progress_percent: f64,
    /// The rate currently being earned, bonuses included, in bps.
    pub current_rate_bps: u32,
    pub can_unstake: bool,
    pub has_halfway_bonus: bool,
}

/// Aggregate totals for one owner.
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    pub active_stakes: usize,
    pub total_staked: u64,
    pub total_claimed: u64,
    pub total_pending_rewards: u64,
}

/// Query service for stake reads.
pub struct StakeQueryService {
    ledger: Arc<dyn LedgerRepository>,
    clock: Arc<dyn Clock>,
    grid_charge_target: u64,
}

impl StakeQueryService {
    pub fn new(
        ledger: Arc<dyn LedgerRepository>,
        clock: Arc<dyn Clock>,
        grid_charge_target: u64,
    ) -> Self {
        Self {
            ledger,
            clock,
            grid_charge_target,
        }
    }

    /// Fetch one stake record without enrichment.
    pub async fn get_stake(&self, stake_id: Uuid) -> StakeResult<Stake> {
        self.ledger
            .get_stake(stake_id)
            .await
            .map_err(|e| StakeError::LedgerUnavailable(e.to_string()))?
            .ok_or(StakeError::NotFound { id: stake_id })
    }

    /// Active stakes for one owner, enriched with computed reward data.
    ///
    /// The boost flag is read once for the whole listing; there is no
    /// snapshot isolation between that read and the per-stake math.
    pub async fn get_user_stakes(&self, owner: &str) -> StakeResult<Vec<EnrichedStake>> {
        let snapshot = self.pool_stats().await?;
        let stakes = self
            .ledger
            .list_active_stakes_by_owner(owner)
            .await
            .map_err(|e| StakeError::LedgerUnavailable(e.to_string()))?;
        let now = self.clock.now_unix();

        Ok(stakes
            .into_iter()
            .map(|stake| enrich(stake, snapshot.boost_active, now))
            .collect())
    }

    /// Current pool utilization and boost state, recomputed from the
    /// active set on every call.
    pub async fn pool_stats(&self) -> StakeResult<PoolSnapshot> {
        pool::load_snapshot(&self.ledger, self.grid_charge_target).await
    }

    /// Owners ranked by active principal.
    pub async fn leaderboard(&self, limit: usize) -> StakeResult<Vec<LeaderboardEntry>> {
        self.ledger
            .top_owners_by_active_principal(limit)
            .await
            .map_err(|e| StakeError::LedgerUnavailable(e.to_string()))
    }

    /// Totals across one owner's active stakes.
    pub async fn user_stats(&self, owner: &str) -> StakeResult<UserStats> {
        let stakes = self.get_user_stakes(owner).await?;
        Ok(UserStats {
            active_stakes: stakes.len(),
            total_staked: stakes.iter().map(|s| s.stake.principal).sum(),
            total_claimed: stakes.iter().map(|s| s.stake.rewards_claimed).sum(),
            total_pending_rewards: stakes.iter().map(|s| s.unclaimed_rewards).sum(),
        })
    }
}

fn enrich(stake: Stake, boost_active: bool, now: i64) -> EnrichedStake {
    let total_rewards = rewards::accrued_for_stake(&stake, boost_active, now);
    let unclaimed_rewards = total_rewards.saturating_sub(stake.rewards_claimed);
    let elapsed = stake.elapsed_secs(now);
    let days_staked = elapsed / SECONDS_PER_DAY;
    let days_remaining = ((stake.end_time - now).max(0) + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    let progress_percent =
        (days_staked as f64 / stake.lock_period.days() as f64 * 100.0).min(100.0);
    let current_rate_bps = rewards::current_rate_bps(&stake, boost_active, now);
    let can_unstake = stake.can_unstake(now);
    let has_halfway_bonus =
        stake.nft_eligible && rewards::halfway_reached(elapsed, stake.lock_period.seconds());

    EnrichedStake {
        stake,
        total_rewards,
        unclaimed_rewards,
        days_staked,
        days_remaining,
        progress_percent,
        current_rate_bps,
        can_unstake,
        has_halfway_bonus,
    }
}
