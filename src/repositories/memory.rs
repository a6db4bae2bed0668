//! In-memory ledger implementation
//!
//! Backs the ledger contract with a single `RwLock`-guarded map. Intended
//! for tests and single-node deployments; a durable store can replace it
//! behind the same trait without touching the domain layer. Holding one
//! write lock for the whole of `apply_claim` gives the atomicity the
//! contract requires.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::stake::{LeaderboardEntry, RewardClaimRecord, Stake, StakeStatus};
use crate::repositories::LedgerRepository;

#[derive(Default)]
struct LedgerState {
    stakes: HashMap<Uuid, Stake>,
    /// Insertion order doubles as creation order for per-owner listings.
    insertion_order: Vec<Uuid>,
    claims: Vec<RewardClaimRecord>,
}

/// Thread-safe in-memory ledger.
#[derive(Clone, Default)]
pub struct InMemoryLedger {
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stakes, any status (for tests).
    pub async fn stake_count(&self) -> usize {
        self.state.read().await.stakes.len()
    }

    /// All claim records, in append order (for tests).
    pub async fn all_claims(&self) -> Vec<RewardClaimRecord> {
        self.state.read().await.claims.clone()
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedger {
    async fn insert_stake(&self, stake: Stake) -> Result<()> {
        let mut state = self.state.write().await;
        if state.stakes.contains_key(&stake.id) {
            bail!("stake {} already exists", stake.id);
        }
        state.insertion_order.push(stake.id);
        state.stakes.insert(stake.id, stake);
        Ok(())
    }

    async fn get_stake(&self, id: Uuid) -> Result<Option<Stake>> {
        Ok(self.state.read().await.stakes.get(&id).cloned())
    }

    async fn list_active_stakes_by_owner(&self, owner: &str) -> Result<Vec<Stake>> {
        let state = self.state.read().await;
        let mut stakes: Vec<Stake> = state
            .insertion_order
            .iter()
            .filter_map(|id| state.stakes.get(id))
            .filter(|s| s.owner == owner && s.status == StakeStatus::Active)
            .cloned()
            .collect();
        stakes.reverse(); // newest first
        Ok(stakes)
    }

    async fn list_all_active_stakes(&self) -> Result<Vec<Stake>> {
        let state = self.state.read().await;
        Ok(state
            .stakes
            .values()
            .filter(|s| s.status == StakeStatus::Active)
            .cloned()
            .collect())
    }

    async fn mark_completed(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.write().await;
        match state.stakes.get_mut(&id) {
            Some(stake) => {
                stake.status = StakeStatus::Completed;
                Ok(())
            }
            None => bail!("stake {} not found", id),
        }
    }

    async fn apply_claim(&self, id: Uuid, amount: u64, record: RewardClaimRecord) -> Result<()> {
        // Single write lock spans both mutations.
        let mut state = self.state.write().await;
        match state.stakes.get_mut(&id) {
            Some(stake) => {
                stake.rewards_claimed = stake.rewards_claimed.saturating_add(amount);
                state.claims.push(record);
                Ok(())
            }
            None => bail!("stake {} not found", id),
        }
    }

    async fn sum_active_principal(&self) -> Result<u64> {
        let state = self.state.read().await;
        Ok(state
            .stakes
            .values()
            .filter(|s| s.status == StakeStatus::Active)
            .map(|s| s.principal)
            .sum())
    }

    async fn count_distinct_active_owners(&self) -> Result<u64> {
        let state = self.state.read().await;
        let owners: HashSet<&str> = state
            .stakes
            .values()
            .filter(|s| s.status == StakeStatus::Active)
            .map(|s| s.owner.as_str())
            .collect();
        Ok(owners.len() as u64)
    }

    async fn top_owners_by_active_principal(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let state = self.state.read().await;
        let mut totals: HashMap<&str, (u64, u64)> = HashMap::new();
        for stake in state.stakes.values() {
            if stake.status == StakeStatus::Active {
                let entry = totals.entry(stake.owner.as_str()).or_insert((0, 0));
                entry.0 += stake.principal;
                entry.1 += stake.rewards_claimed;
            }
        }
        let mut entries: Vec<LeaderboardEntry> = totals
            .into_iter()
            .map(|(owner, (total_staked, total_claimed))| LeaderboardEntry {
                owner: owner.to_string(),
                total_staked,
                total_claimed,
            })
            .collect();
        entries.sort_by(|a, b| b.total_staked.cmp(&a.total_staked).then(a.owner.cmp(&b.owner)));
        entries.truncate(limit);
        Ok(entries)
    }

    async fn list_claims_for_stake(&self, id: Uuid) -> Result<Vec<RewardClaimRecord>> {
        let state = self.state.read().await;
        Ok(state
            .claims
            .iter()
            .filter(|c| c.stake_id == id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stake::LockPeriod;

    fn stake(owner: &str, principal: u64) -> Stake {
        Stake {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            principal,
            lock_period: LockPeriod::Days30,
            base_rate_bps: 500,
            start_time: 0,
            end_time: LockPeriod::Days30.seconds(),
            rewards_claimed: 0,
            nft_eligible: false,
            status: StakeStatus::Active,
        }
    }

    #[tokio::test]
    async fn completed_stakes_drop_out_of_aggregates() {
        let ledger = InMemoryLedger::new();
        let a = stake("alice", 100);
        let b = stake("bob", 50);
        let a_id = a.id;
        ledger.insert_stake(a).await.unwrap();
        ledger.insert_stake(b).await.unwrap();

        assert_eq!(ledger.sum_active_principal().await.unwrap(), 150);
        assert_eq!(ledger.count_distinct_active_owners().await.unwrap(), 2);

        ledger.mark_completed(a_id).await.unwrap();
        assert_eq!(ledger.sum_active_principal().await.unwrap(), 50);
        assert_eq!(ledger.count_distinct_active_owners().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn apply_claim_increments_and_records_together() {
        let ledger = InMemoryLedger::new();
        let s = stake("alice", 100);
        let id = s.id;
        ledger.insert_stake(s).await.unwrap();

        let record = RewardClaimRecord {
            stake_id: id,
            owner: "alice".into(),
            amount: 7,
            claimed_at: 123,
        };
        ledger.apply_claim(id, 7, record).await.unwrap();

        let stored = ledger.get_stake(id).await.unwrap().unwrap();
        assert_eq!(stored.rewards_claimed, 7);
        let claims = ledger.list_claims_for_stake(id).await.unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].amount, 7);
    }

    #[tokio::test]
    async fn leaderboard_ranks_by_active_principal() {
        let ledger = InMemoryLedger::new();
        ledger.insert_stake(stake("alice", 300)).await.unwrap();
        ledger.insert_stake(stake("bob", 500)).await.unwrap();
        ledger.insert_stake(stake("alice", 100)).await.unwrap();

        let top = ledger.top_owners_by_active_principal(5).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].owner, "bob");
        assert_eq!(top[0].total_staked, 500);
        assert_eq!(top[1].owner, "alice");
        assert_eq!(top[1].total_staked, 400);

        let top_one = ledger.top_owners_by_active_principal(1).await.unwrap();
        assert_eq!(top_one.len(), 1);
    }

    #[tokio::test]
    async fn per_owner_listing_is_newest_first() {
        let ledger = InMemoryLedger::new();
        let first = stake("alice", 1);
        let second = stake("alice", 2);
        let second_id = second.id;
        ledger.insert_stake(first).await.unwrap();
        ledger.insert_stake(second).await.unwrap();

        let stakes = ledger.list_active_stakes_by_owner("alice").await.unwrap();
        assert_eq!(stakes[0].id, second_id);
    }
}
