//! Domain Errors Module
//!
//! Typed errors for the staking core. Each variant carries enough structure
//! (kind plus human-readable message) for the transport boundary to map it
//! to a status code; the core itself never encodes transport concerns.

use uuid::Uuid;

/// Result type for staking domain operations
pub type StakeResult<T> = Result<T, StakeError>;

/// Staking domain error taxonomy
#[derive(Debug, Clone, thiserror::Error)]
pub enum StakeError {
    /// Lock period outside the enumerated tier set. Rejected synchronously,
    /// no side effects.
    #[error("invalid lock period: {days} days (must be 30, 90, or 365)")]
    InvalidLockPeriod { days: u32 },

    /// Non-positive principal. Rejected synchronously, no side effects.
    #[error("invalid stake amount: {amount} (must be positive)")]
    InvalidAmount { amount: u64 },

    #[error("stake not found: {id}")]
    NotFound { id: Uuid },

    /// Caller is not the stake owner.
    #[error("not authorized for stake {id}")]
    Unauthorized { id: Uuid },

    /// Stake is already completed; no claims or transitions remain.
    #[error("stake {id} is not active")]
    NotActive { id: Uuid },

    /// Non-NFT stake attempted to unstake before `end_time`.
    #[error("lock period not completed for stake {id} ({remaining_secs}s remaining); only NFT holders can unstake early")]
    LockNotExpired { id: Uuid, remaining_secs: i64 },

    /// Accrued rewards do not exceed the already-claimed amount.
    #[error("no rewards to claim for stake {id}")]
    NothingToClaim { id: Uuid },

    /// The verification gate rejected the supplied proof, or (in strict
    /// mode) the gate itself was unreachable.
    #[error("proof verification failed: {reason}")]
    VerificationFailed { reason: String },

    /// Transient infrastructure failure in the ledger store. The operation
    /// was not partially applied and is safe to retry.
    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),
}

impl StakeError {
    /// Stable machine-readable kind for logs and API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidLockPeriod { .. } => "invalid_lock_period",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::NotFound { .. } => "not_found",
            Self::Unauthorized { .. } => "unauthorized",
            Self::NotActive { .. } => "not_active",
            Self::LockNotExpired { .. } => "lock_not_expired",
            Self::NothingToClaim { .. } => "nothing_to_claim",
            Self::VerificationFailed { .. } => "verification_failed",
            Self::LedgerUnavailable(_) => "ledger_unavailable",
        }
    }
}
