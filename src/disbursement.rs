//! Disbursement intents
//!
//! After a successful claim or unstake, the core emits an intent for an
//! external transfer executor; the core itself never moves funds. Sink
//! failures are logged and never roll back the ledger bookkeeping: claimed
//! state and on-chain disbursement are allowed to diverge temporarily, and
//! reconciliation lives outside this service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the transferred amount represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisbursementKind {
    Reward,
    Principal,
}

/// A request for the external transfer executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisbursementIntent {
    pub stake_id: Uuid,
    pub owner: String,
    pub amount: u64,
    pub kind: DisbursementKind,
}

/// Seam toward the external transfer executor.
#[async_trait]
pub trait DisbursementSink: Send + Sync {
    async fn submit(&self, intent: DisbursementIntent) -> anyhow::Result<()>;
}

/// Sink that only records the intent in the logs.
///
/// Stands in wherever no transfer executor is wired up; the log line is
/// the hand-off point for operators running transfers out-of-band.
#[derive(Clone)]
pub struct LoggingDisbursementSink;

impl LoggingDisbursementSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingDisbursementSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DisbursementSink for LoggingDisbursementSink {
    async fn submit(&self, intent: DisbursementIntent) -> anyhow::Result<()> {
        tracing::info!(
            stake_id = %intent.stake_id,
            owner = %intent.owner,
            amount = intent.amount,
            kind = ?intent.kind,
            "Disbursement intent emitted"
        );
        Ok(())
    }
}
