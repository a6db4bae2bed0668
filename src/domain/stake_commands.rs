//! Stake command service - handles mutations (writes)
//!
//! All stake state changes go through this service: creation, reward
//! claims, and unstaking. It follows the CQRS split - commands mutate and
//! return identifiers or amounts, never display data (see
//! [`super::stake_queries`] for reads).
//!
//! Claim and unstake hold the per-stake lock across their whole
//! read-compute-write span, so concurrent mutations on one stake
//! serialize: exactly one claim wins the unclaimed amount and the loser
//! observes the post-claim state.

use std::sync::Arc;
use uuid::Uuid;

use crate::clock::Clock;
use crate::disbursement::{DisbursementIntent, DisbursementKind, DisbursementSink};
use crate::domain::errors::{StakeError, StakeResult};
use crate::domain::events::{DomainEvent, EventPublisher};
use crate::domain::locks::StakeLockRegistry;
use crate::domain::pool;
use crate::domain::rewards;
use crate::domain::stake::{LockPeriod, RewardClaimRecord, Stake, StakeStatus};
use crate::domain::state_machine::StakeStateMachine;
use crate::nft::NftLookup;
use crate::repositories::LedgerRepository;
use crate::verification::VerificationGate;

/// Parameters for opening a stake.
#[derive(Debug, Clone)]
pub struct StakeRequest {
    pub owner: String,
    pub principal: u64,
    pub lock_period_days: u32,
    /// Opaque proof reference (transaction signature) for the
    /// verification gate. Checked only when a gate is configured.
    pub proof_ref: Option<String>,
}

/// Result of a successful unstake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstakeOutcome {
    pub principal: u64,
    /// Final unclaimed rewards at completion time. Informational - the
    /// caller decides whether and how to disburse.
    pub unclaimed_rewards: u64,
}

/// Command service for stake mutations.
pub struct StakeCommandService {
    ledger: Arc<dyn LedgerRepository>,
    nft: Arc<dyn NftLookup>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventPublisher>,
    disbursements: Arc<dyn DisbursementSink>,
    verification: Option<VerificationGate>,
    locks: StakeLockRegistry,
    grid_charge_target: u64,
}

impl StakeCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ledger: Arc<dyn LedgerRepository>,
        nft: Arc<dyn NftLookup>,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventPublisher>,
        disbursements: Arc<dyn DisbursementSink>,
        verification: Option<VerificationGate>,
        grid_charge_target: u64,
    ) -> Self {
        Self {
            ledger,
            nft,
            clock,
            events,
            disbursements,
            verification,
            locks: StakeLockRegistry::new(),
            grid_charge_target,
        }
    }

    /// Open a new stake.
    ///
    /// Validation happens before any side effect: an invalid lock period
    /// or non-positive amount is rejected synchronously. NFT holdership is
    /// evaluated once here and snapshotted onto the record; it is never
    /// re-checked later.
    pub async fn create_stake(&self, request: StakeRequest) -> StakeResult<Uuid> {
        let lock_period = LockPeriod::from_days(request.lock_period_days).ok_or(
            StakeError::InvalidLockPeriod {
                days: request.lock_period_days,
            },
        )?;
        if request.principal == 0 {
            return Err(StakeError::InvalidAmount {
                amount: request.principal,
            });
        }

        if let (Some(gate), Some(proof_ref)) = (&self.verification, &request.proof_ref) {
            gate.check(proof_ref).await?;
        }

        // Lookup failure degrades to not-a-holder rather than blocking the
        // stake.
        let nft_eligible = match self.nft.holds_nft(&request.owner).await {
            Ok(holds) => holds,
            Err(err) => {
                tracing::warn!(
                    owner = %request.owner,
                    error = %err,
                    "NFT lookup failed, treating owner as non-holder"
                );
                false
            }
        };

        let now = self.clock.now_unix();
        let stake = Stake {
            id: Uuid::new_v4(),
            owner: request.owner.clone(),
            principal: request.principal,
            lock_period,
            base_rate_bps: lock_period.base_rate_bps(),
            start_time: now,
            end_time: now + lock_period.seconds(),
            rewards_claimed: 0,
            nft_eligible,
            status: StakeStatus::Active,
        };
        let stake_id = stake.id;

        self.ledger
            .insert_stake(stake)
            .await
            .map_err(|e| StakeError::LedgerUnavailable(e.to_string()))?;

        tracing::info!(
            stake_id = %stake_id,
            owner = %request.owner,
            principal = request.principal,
            lock_days = request.lock_period_days,
            nft_eligible,
            "Stake created"
        );

        self.publish(DomainEvent::StakeCreated {
            stake_id,
            owner: request.owner,
            principal: request.principal,
            lock_days: request.lock_period_days,
            nft_eligible,
            timestamp: now,
        })
        .await;

        Ok(stake_id)
    }

    /// Claim all currently unclaimed rewards on a stake.
    ///
    /// The claimed-amount increment and the audit-record append are applied
    /// as one atomic ledger call; an immediate second claim with no elapsed
    /// time yields `NothingToClaim`.
    pub async fn claim_rewards(&self, stake_id: Uuid, owner: &str) -> StakeResult<u64> {
        let _guard = self.locks.acquire(stake_id).await;

        let stake = self.load_owned_active(stake_id, owner).await?;
        let snapshot = pool::load_snapshot(&self.ledger, self.grid_charge_target).await?;
        let now = self.clock.now_unix();

        let total = rewards::accrued_for_stake(&stake, snapshot.boost_active, now);
        let unclaimed = total.saturating_sub(stake.rewards_claimed);
        if unclaimed == 0 {
            return Err(StakeError::NothingToClaim { id: stake_id });
        }

        let record = RewardClaimRecord {
            stake_id,
            owner: owner.to_string(),
            amount: unclaimed,
            claimed_at: now,
        };
        self.ledger
            .apply_claim(stake_id, unclaimed, record)
            .await
            .map_err(|e| StakeError::LedgerUnavailable(e.to_string()))?;

        tracing::info!(
            stake_id = %stake_id,
            owner = %owner,
            amount = unclaimed,
            boost_active = snapshot.boost_active,
            "Rewards claimed"
        );

        self.publish(DomainEvent::RewardsClaimed {
            stake_id,
            owner: owner.to_string(),
            amount: unclaimed,
            timestamp: now,
        })
        .await;

        self.disburse(DisbursementIntent {
            stake_id,
            owner: owner.to_string(),
            amount: unclaimed,
            kind: DisbursementKind::Reward,
        })
        .await;

        Ok(unclaimed)
    }

    /// Close a stake and release its principal.
    ///
    /// Non-NFT stakes must wait for the lock to expire; NFT-eligible stakes
    /// bypass the lock entirely. Rewards keep accruing until this call, so
    /// the returned `unclaimed_rewards` reflects accrual through `now`.
    pub async fn unstake(&self, stake_id: Uuid, owner: &str) -> StakeResult<UnstakeOutcome> {
        let _guard = self.locks.acquire(stake_id).await;

        let stake = self.load_owned_active(stake_id, owner).await?;
        let now = self.clock.now_unix();

        if !stake.nft_eligible && now < stake.end_time {
            return Err(StakeError::LockNotExpired {
                id: stake_id,
                remaining_secs: stake.end_time - now,
            });
        }

        StakeStateMachine::validate_transition(stake.status, StakeStatus::Completed).map_err(
            |_| StakeError::NotActive { id: stake_id },
        )?;

        let snapshot = pool::load_snapshot(&self.ledger, self.grid_charge_target).await?;
        let total = rewards::accrued_for_stake(&stake, snapshot.boost_active, now);
        let unclaimed = total.saturating_sub(stake.rewards_claimed);

        self.ledger
            .mark_completed(stake_id)
            .await
            .map_err(|e| StakeError::LedgerUnavailable(e.to_string()))?;

        tracing::info!(
            stake_id = %stake_id,
            owner = %owner,
            principal = stake.principal,
            unclaimed_rewards = unclaimed,
            early = now < stake.end_time,
            "Stake completed"
        );

        self.publish(DomainEvent::Unstaked {
            stake_id,
            owner: owner.to_string(),
            principal: stake.principal,
            unclaimed_rewards: unclaimed,
            timestamp: now,
        })
        .await;

        self.disburse(DisbursementIntent {
            stake_id,
            owner: owner.to_string(),
            amount: stake.principal,
            kind: DisbursementKind::Principal,
        })
        .await;

        self.locks.release_terminal(stake_id);

        Ok(UnstakeOutcome {
            principal: stake.principal,
            unclaimed_rewards: unclaimed,
        })
    }

    /// Shared precondition checks, in the order callers observe them:
    /// existence, ownership, activity.
    async fn load_owned_active(&self, stake_id: Uuid, owner: &str) -> StakeResult<Stake> {
        let stake = self
            .ledger
            .get_stake(stake_id)
            .await
            .map_err(|e| StakeError::LedgerUnavailable(e.to_string()))?
            .ok_or(StakeError::NotFound { id: stake_id })?;

        if stake.owner != owner {
            return Err(StakeError::Unauthorized { id: stake_id });
        }
        if !StakeStateMachine::allows_claims(stake.status) {
            return Err(StakeError::NotActive { id: stake_id });
        }
        Ok(stake)
    }

    async fn publish(&self, event: DomainEvent) {
        if let Err(err) = self.events.publish(event).await {
            tracing::warn!(error = %err, "Failed to publish domain event");
        }
    }

    /// Sink failures never roll back bookkeeping; claimed state and
    /// on-chain disbursement may diverge until reconciled externally.
    async fn disburse(&self, intent: DisbursementIntent) {
        if let Err(err) = self.disbursements.submit(intent).await {
            tracing::warn!(error = %err, "Failed to submit disbursement intent");
        }
    }
}
