//! Domain events
//!
//! Events emitted after successful state mutations. Publishing happens
//! after the ledger write commits, so subscribers observe only changes
//! that actually happened; a publish failure never rolls the mutation
//! back.

use async_trait::async_trait;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted by the stake lifecycle services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    StakeCreated {
        stake_id: Uuid,
        owner: String,
        principal: u64,
        lock_days: u32,
        nft_eligible: bool,
        timestamp: i64,
    },
    RewardsClaimed {
        stake_id: Uuid,
        owner: String,
        amount: u64,
        timestamp: i64,
    },
    Unstaked {
        stake_id: Uuid,
        owner: String,
        principal: u64,
        unclaimed_rewards: u64,
        timestamp: i64,
    },
}

impl DomainEvent {
    pub fn stake_id(&self) -> Uuid {
        match self {
            Self::StakeCreated { stake_id, .. }
            | Self::RewardsClaimed { stake_id, .. }
            | Self::Unstaked { stake_id, .. } => *stake_id,
        }
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            Self::StakeCreated { timestamp, .. }
            | Self::RewardsClaimed { timestamp, .. }
            | Self::Unstaked { timestamp, .. } => *timestamp,
        }
    }

    /// Human-readable description for logs.
    pub fn description(&self) -> String {
        match self {
            Self::StakeCreated {
                owner,
                principal,
                lock_days,
                ..
            } => format!("{} staked {} for {} days", owner, principal, lock_days),
            Self::RewardsClaimed { owner, amount, .. } => {
                format!("{} claimed {} in rewards", owner, amount)
            }
            Self::Unstaked {
                owner, principal, ..
            } => format!("{} unstaked {}", owner, principal),
        }
    }
}

/// Publisher seam for domain events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: DomainEvent) -> Result<()>;
}
