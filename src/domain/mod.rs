//! Domain layer - Business logic and orchestration
//!
//! The staking core: reward math, stake lifecycle, and pool aggregation.
//! It sits between the HTTP handlers and the infrastructure seams (ledger
//! store, proof verifier, NFT lookup, disbursement executor) and never
//! touches a transport or storage engine directly.
//!
//! Benefits:
//! - Encapsulates the staking rules and validation
//! - Reduces coupling between handlers and infrastructure
//! - Makes the reward engine testable independently of the HTTP layer

pub mod errors;
pub mod event_publishers;
pub mod events;
pub mod locks;
pub mod pool;
pub mod property_tests;
pub mod rewards;
pub mod stake;
pub mod stake_commands;
pub mod stake_queries;
pub mod state_machine;

// Re-export key types for convenience
pub use errors::{StakeError, StakeResult};
pub use event_publishers::{InMemoryEventPublisher, LoggingEventPublisher, NoOpEventPublisher};
pub use events::{DomainEvent, EventPublisher};
pub use pool::PoolSnapshot;
pub use stake::{LeaderboardEntry, LockPeriod, RewardClaimRecord, Stake, StakeStatus};
pub use stake_commands::{StakeCommandService, StakeRequest, UnstakeOutcome};
pub use stake_queries::{EnrichedStake, StakeQueryService, UserStats};
pub use state_machine::StakeStateMachine;
