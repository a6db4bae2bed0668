//! Repository layer - persistence contracts
//!
//! The staking core never talks to a storage engine directly; it depends on
//! the [`LedgerRepository`] trait and treats the store behind it as an
//! external collaborator. Implementations must make `apply_claim` atomic:
//! the claimed-amount increment and the audit-record append land together
//! or not at all.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::stake::{LeaderboardEntry, RewardClaimRecord, Stake};

pub mod memory;
pub mod mocks;

pub use memory::InMemoryLedger;

/// Persistence contract for stake records and claim audit entries.
///
/// Infrastructure failures are reported through `anyhow::Error`; the domain
/// layer maps them to its `LedgerUnavailable` error kind. No method may
/// partially apply its write.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Persist a brand-new stake record.
    async fn insert_stake(&self, stake: Stake) -> Result<()>;

    async fn get_stake(&self, id: Uuid) -> Result<Option<Stake>>;

    /// Active stakes for one owner, newest first.
    async fn list_active_stakes_by_owner(&self, owner: &str) -> Result<Vec<Stake>>;

    /// Every Active stake, for pool aggregation.
    async fn list_all_active_stakes(&self) -> Result<Vec<Stake>>;

    /// Flip a stake's status to Completed.
    async fn mark_completed(&self, id: Uuid) -> Result<()>;

    /// Atomically increment the stake's claimed amount and append the
    /// audit record. A crash must never leave one without the other.
    async fn apply_claim(&self, id: Uuid, amount: u64, record: RewardClaimRecord) -> Result<()>;

    /// Sum of principal across Active stakes.
    async fn sum_active_principal(&self) -> Result<u64>;

    /// Distinct owners holding at least one Active stake.
    async fn count_distinct_active_owners(&self) -> Result<u64>;

    /// Owners ranked by active principal, descending.
    async fn top_owners_by_active_principal(&self, limit: usize) -> Result<Vec<LeaderboardEntry>>;

    /// Audit records for one stake, in claim order.
    async fn list_claims_for_stake(&self, id: Uuid) -> Result<Vec<RewardClaimRecord>>;
}
