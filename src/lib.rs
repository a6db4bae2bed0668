//! Token staking service
//!
//! A staking ledger with tiered lock periods, NFT-gated bonus rates, a
//! pool-wide grid boost, and a proof-verification gate in front of stake
//! creation. The domain layer is transport-agnostic; `server` exposes it
//! over HTTP.

pub mod cache;
pub mod clock;
pub mod config;
pub mod constants;
pub mod disbursement;
pub mod domain;
pub mod handlers;
pub mod nft;
pub mod repositories;
pub mod server;
pub mod state;
pub mod verification;

// Re-export the types most callers need.
pub use config::AppConfig;
pub use domain::{
    EnrichedStake, LeaderboardEntry, LockPeriod, PoolSnapshot, Stake, StakeCommandService,
    StakeError, StakeQueryService, StakeRequest, StakeResult, StakeStatus, UserStats,
};
pub use state::AppState;
