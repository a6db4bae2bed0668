//! Per-stake mutual exclusion
//!
//! Claim and unstake are read-compute-write sequences against the ledger;
//! two of them racing on the same stake could both compute from the same
//! pre-mutation snapshot. The registry hands out one async mutex per stake
//! id so mutations on a stake serialize while operations on different
//! stakes proceed in parallel. Reads take no locks.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Registry of per-stake-id mutexes.
#[derive(Clone, Default)]
pub struct StakeLockRegistry {
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl StakeLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the mutation lock for one stake, waiting if another
    /// mutation holds it.
    pub async fn acquire(&self, stake_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(stake_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Drop the mutex for a stake that reached its terminal state.
    pub fn release_terminal(&self, stake_id: Uuid) {
        self.locks.remove(&stake_id);
    }
}
