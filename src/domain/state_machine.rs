//! Stake State Machine - Domain Business Rules
//!
//! State transition validation for stakes. The machine is intentionally
//! tiny:
//!
//! ```text
//!   {none} --create--> Active --unstake--> Completed
//! ```
//!
//! Terminal state: Completed. A completed stake accepts no further claims
//! and no further transitions; the only way back in is a brand-new stake.

use crate::domain::stake::StakeStatus;

/// Domain error for invalid state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransitionError {
    pub from: StakeStatus,
    pub to: StakeStatus,
    pub reason: String,
}

impl std::fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid state transition from {} to {}: {}",
            self.from, self.to, self.reason
        )
    }
}

impl std::error::Error for StateTransitionError {}

/// Result type for state machine operations
pub type StateResult<T> = Result<T, StateTransitionError>;

/// Pure transition validator with no side effects.
pub struct StakeStateMachine;

impl StakeStateMachine {
    /// Validate a status transition.
    ///
    /// Active → Completed is the only permitted change. Re-asserting the
    /// Active state is allowed (idempotent no-op); re-completing a
    /// completed stake is not, so a duplicate unstake surfaces as an error
    /// rather than silently succeeding.
    pub fn validate_transition(from: StakeStatus, to: StakeStatus) -> StateResult<()> {
        use StakeStatus::*;

        match (from, to) {
            (Active, Active) => Ok(()),
            (Active, Completed) => Ok(()),
            (Completed, _) => Err(StateTransitionError {
                from,
                to,
                reason: "completed stakes are terminal".to_string(),
            }),
        }
    }

    /// Check if a status is terminal (immutable).
    pub fn is_terminal(status: StakeStatus) -> bool {
        matches!(status, StakeStatus::Completed)
    }

    /// Whether claims are permitted in this status.
    pub fn allows_claims(status: StakeStatus) -> bool {
        matches!(status, StakeStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stake::StakeStatus::*;

    #[test]
    fn active_to_completed_is_the_only_real_transition() {
        assert!(StakeStateMachine::validate_transition(Active, Completed).is_ok());
        assert!(StakeStateMachine::validate_transition(Active, Active).is_ok());
    }

    #[test]
    fn completed_is_terminal() {
        assert!(StakeStateMachine::validate_transition(Completed, Active).is_err());
        // Even Completed → Completed is rejected: a second unstake must fail.
        assert!(StakeStateMachine::validate_transition(Completed, Completed).is_err());
        assert!(StakeStateMachine::is_terminal(Completed));
        assert!(!StakeStateMachine::is_terminal(Active));
    }

    #[test]
    fn claims_only_while_active() {
        assert!(StakeStateMachine::allows_claims(Active));
        assert!(!StakeStateMachine::allows_claims(Completed));
    }
}
