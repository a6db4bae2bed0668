//! Core stake types
//!
//! A [`Stake`] is one deposit commitment: a principal amount locked for a
//! fixed term at an annual rate snapshotted from the tier table at creation.
//! Everything on the record except `rewards_claimed` and `status` is
//! immutable after creation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    RATE_30_DAYS_BPS, RATE_365_DAYS_BPS, RATE_90_DAYS_BPS, SECONDS_PER_DAY,
};

/// The fixed set of lock terms a stake may commit to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum LockPeriod {
    Days30,
    Days90,
    Days365,
}

impl LockPeriod {
    /// Parse a lock period from a day count. Only 30, 90, and 365 are valid.
    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            30 => Some(Self::Days30),
            90 => Some(Self::Days90),
            365 => Some(Self::Days365),
            _ => None,
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Self::Days30 => 30,
            Self::Days90 => 90,
            Self::Days365 => 365,
        }
    }

    pub fn seconds(&self) -> i64 {
        self.days() as i64 * SECONDS_PER_DAY
    }

    /// Annual rate for this tier, in basis points.
    ///
    /// Looked up once at stake creation; later tier-table changes never
    /// retroactively affect existing stakes.
    pub fn base_rate_bps(&self) -> u32 {
        match self {
            Self::Days30 => RATE_30_DAYS_BPS,
            Self::Days90 => RATE_90_DAYS_BPS,
            Self::Days365 => RATE_365_DAYS_BPS,
        }
    }
}

impl TryFrom<u32> for LockPeriod {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::from_days(days).ok_or_else(|| format!("invalid lock period: {} days", days))
    }
}

impl From<LockPeriod> for u32 {
    fn from(period: LockPeriod) -> u32 {
        period.days()
    }
}

/// Lifecycle status of a stake.
///
/// `Active → Completed` is the only transition, one-way, triggered by
/// unstake. Completed stakes accept no further claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StakeStatus {
    Active,
    Completed,
}

impl std::fmt::Display for StakeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// One deposit commitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stake {
    pub id: Uuid,
    /// Wallet address of the staker.
    pub owner: String,
    /// Locked amount in base token units. Positive, immutable.
    pub principal: u64,
    pub lock_period: LockPeriod,
    /// Annual rate snapshotted from the tier table at creation, in bps.
    pub base_rate_bps: u32,
    /// Unix seconds when the stake was opened.
    pub start_time: i64,
    /// `start_time + lock_period`. Normal (non-NFT) unstaking is allowed
    /// only from this point on.
    pub end_time: i64,
    /// Cumulative rewards already paid out. Monotonically non-decreasing,
    /// mutated only by the claim operation.
    pub rewards_claimed: u64,
    /// NFT holdership snapshot taken once at creation, never re-checked.
    pub nft_eligible: bool,
    pub status: StakeStatus,
}

impl Stake {
    /// Seconds elapsed since the stake opened, clamped to zero so clock
    /// skew can never produce negative accrual.
    pub fn elapsed_secs(&self, now: i64) -> i64 {
        (now - self.start_time).max(0)
    }

    /// Whether the owner may unstake at `now`. NFT holders bypass the lock
    /// entirely; everyone else waits for `end_time`.
    pub fn can_unstake(&self, now: i64) -> bool {
        self.nft_eligible || now >= self.end_time
    }
}

/// Immutable audit entry written exactly once per successful claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardClaimRecord {
    pub stake_id: Uuid,
    pub owner: String,
    pub amount: u64,
    pub claimed_at: i64,
}

/// One leaderboard row: an owner ranked by active principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub owner: String,
    pub total_staked: u64,
    pub total_claimed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_period_rejects_unknown_day_counts() {
        assert!(LockPeriod::from_days(30).is_some());
        assert!(LockPeriod::from_days(90).is_some());
        assert!(LockPeriod::from_days(365).is_some());
        for days in [0, 1, 29, 31, 60, 180, 364, 366, 730] {
            assert!(LockPeriod::from_days(days).is_none(), "{} days", days);
        }
    }

    #[test]
    fn lock_period_tier_table() {
        assert_eq!(LockPeriod::Days30.base_rate_bps(), 500);
        assert_eq!(LockPeriod::Days90.base_rate_bps(), 1_000);
        assert_eq!(LockPeriod::Days365.base_rate_bps(), 2_000);
    }

    #[test]
    fn elapsed_clamps_negative_to_zero() {
        let stake = Stake {
            id: Uuid::new_v4(),
            owner: "wallet".into(),
            principal: 1_000,
            lock_period: LockPeriod::Days30,
            base_rate_bps: 500,
            start_time: 1_000,
            end_time: 1_000 + LockPeriod::Days30.seconds(),
            rewards_claimed: 0,
            nft_eligible: false,
            status: StakeStatus::Active,
        };
        assert_eq!(stake.elapsed_secs(500), 0);
        assert_eq!(stake.elapsed_secs(1_000), 0);
        assert_eq!(stake.elapsed_secs(1_060), 60);
    }
}
