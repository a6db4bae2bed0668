//! Stake domain module
//!
//! Contains all stake-related domain types.

pub mod types;

pub use types::{LeaderboardEntry, LockPeriod, RewardClaimRecord, Stake, StakeStatus};
