//! Mock implementations for testing
//!
//! Test doubles for the external collaborator seams: a ledger that always
//! fails, fixed-answer NFT lookups and proof verifiers, and a disbursement
//! sink that records what it was asked to transfer.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::disbursement::{DisbursementIntent, DisbursementSink};
use crate::domain::stake::{LeaderboardEntry, RewardClaimRecord, Stake};
use crate::nft::NftLookup;
use crate::repositories::LedgerRepository;
use crate::verification::{ProofVerifier, Verification};

/// Ledger whose every operation fails, for exercising the
/// `LedgerUnavailable` paths.
pub struct FailingLedger;

#[async_trait]
impl LedgerRepository for FailingLedger {
    async fn insert_stake(&self, _stake: Stake) -> Result<()> {
        bail!("ledger offline")
    }

    async fn get_stake(&self, _id: Uuid) -> Result<Option<Stake>> {
        bail!("ledger offline")
    }

    async fn list_active_stakes_by_owner(&self, _owner: &str) -> Result<Vec<Stake>> {
        bail!("ledger offline")
    }

    async fn list_all_active_stakes(&self) -> Result<Vec<Stake>> {
        bail!("ledger offline")
    }

    async fn mark_completed(&self, _id: Uuid) -> Result<()> {
        bail!("ledger offline")
    }

    async fn apply_claim(
        &self,
        _id: Uuid,
        _amount: u64,
        _record: RewardClaimRecord,
    ) -> Result<()> {
        bail!("ledger offline")
    }

    async fn sum_active_principal(&self) -> Result<u64> {
        bail!("ledger offline")
    }

    async fn count_distinct_active_owners(&self) -> Result<u64> {
        bail!("ledger offline")
    }

    async fn top_owners_by_active_principal(
        &self,
        _limit: usize,
    ) -> Result<Vec<LeaderboardEntry>> {
        bail!("ledger offline")
    }

    async fn list_claims_for_stake(&self, _id: Uuid) -> Result<Vec<RewardClaimRecord>> {
        bail!("ledger offline")
    }
}

/// NFT lookup returning a fixed answer for every wallet.
pub struct StaticNftLookup {
    pub holds: bool,
}

impl StaticNftLookup {
    pub fn holder() -> Arc<Self> {
        Arc::new(Self { holds: true })
    }

    pub fn non_holder() -> Arc<Self> {
        Arc::new(Self { holds: false })
    }
}

#[async_trait]
impl NftLookup for StaticNftLookup {
    async fn holds_nft(&self, _owner: &str) -> Result<bool> {
        Ok(self.holds)
    }
}

/// NFT lookup whose backend is unreachable.
pub struct ErroringNftLookup;

#[async_trait]
impl NftLookup for ErroringNftLookup {
    async fn holds_nft(&self, _owner: &str) -> Result<bool> {
        bail!("rpc unreachable")
    }
}

/// Verifier that accepts every proof.
pub struct ApprovingVerifier;

#[async_trait]
impl ProofVerifier for ApprovingVerifier {
    async fn verify(&self, _proof_ref: &str) -> Result<Verification> {
        Ok(Verification::valid())
    }
}

/// Verifier that rejects every proof.
pub struct RejectingVerifier;

#[async_trait]
impl ProofVerifier for RejectingVerifier {
    async fn verify(&self, _proof_ref: &str) -> Result<Verification> {
        Ok(Verification::invalid("transaction not found"))
    }
}

/// Verifier whose backend call always errors (network failure).
pub struct ErroringVerifier;

#[async_trait]
impl ProofVerifier for ErroringVerifier {
    async fn verify(&self, _proof_ref: &str) -> Result<Verification> {
        bail!("connection refused")
    }
}

/// Disbursement sink that records every submitted intent.
#[derive(Clone, Default)]
pub struct CollectingDisbursementSink {
    intents: Arc<Mutex<Vec<DisbursementIntent>>>,
}

impl CollectingDisbursementSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn intents(&self) -> Vec<DisbursementIntent> {
        self.intents.lock().await.clone()
    }
}

#[async_trait]
impl DisbursementSink for CollectingDisbursementSink {
    async fn submit(&self, intent: DisbursementIntent) -> Result<()> {
        self.intents.lock().await.push(intent);
        Ok(())
    }
}
