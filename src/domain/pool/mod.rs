//! Pool domain module
//!
//! Grid-wide aggregation over the set of active stakes.

pub mod types;

pub use types::PoolSnapshot;

use std::sync::Arc;

use crate::domain::errors::{StakeError, StakeResult};
use crate::repositories::LedgerRepository;

/// Load a fresh pool snapshot from the ledger.
///
/// Recomputed on demand from the active set; nothing is persisted, so the
/// snapshot can never go stale. The boost flag is a hard threshold with no
/// hysteresis: utilization oscillating around the target flips it on and
/// off across successive reads, and callers must tolerate that.
pub async fn load_snapshot(
    ledger: &Arc<dyn LedgerRepository>,
    target: u64,
) -> StakeResult<PoolSnapshot> {
    let total = ledger
        .sum_active_principal()
        .await
        .map_err(|e| StakeError::LedgerUnavailable(e.to_string()))?;
    let stakers = ledger
        .count_distinct_active_owners()
        .await
        .map_err(|e| StakeError::LedgerUnavailable(e.to_string()))?;

    Ok(PoolSnapshot::compute(total, stakers, target))
}
