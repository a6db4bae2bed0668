//! Application state
//!
//! Aggregates the domain services behind one cloneable handle for the HTTP
//! layer. Construction wires the infrastructure seams (ledger, NFT lookup,
//! verification gate, event publisher, disbursement sink) into the command
//! and query services.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::disbursement::{DisbursementSink, LoggingDisbursementSink};
use crate::domain::event_publishers::LoggingEventPublisher;
use crate::domain::events::EventPublisher;
use crate::domain::stake_commands::StakeCommandService;
use crate::domain::stake_queries::StakeQueryService;
use crate::nft::{CachedNftLookup, NftLookup, RpcNftLookup};
use crate::repositories::{InMemoryLedger, LedgerRepository};
use crate::verification::{RpcProofVerifier, VerificationGate};

/// Shared application state for the HTTP layer.
#[derive(Clone)]
pub struct AppState {
    commands: Arc<StakeCommandService>,
    queries: Arc<StakeQueryService>,
    leaderboard_limit: usize,
}

impl AppState {
    pub fn new(
        commands: Arc<StakeCommandService>,
        queries: Arc<StakeQueryService>,
        leaderboard_limit: usize,
    ) -> Self {
        Self {
            commands,
            queries,
            leaderboard_limit,
        }
    }

    /// Build production state from configuration.
    ///
    /// Uses the in-memory ledger; a durable store drops in behind the same
    /// trait via [`AppState::with_collaborators`].
    pub fn from_config(config: &AppConfig) -> Self {
        let ledger: Arc<dyn LedgerRepository> = Arc::new(InMemoryLedger::new());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let nft: Arc<dyn NftLookup> = Arc::new(CachedNftLookup::new(
            Arc::new(RpcNftLookup::new(
                config.verification.rpc_url.clone(),
                config.verification.collection_mint.clone(),
            )),
            config.staking.nft_cache_ttl_secs as i64,
            clock.clone(),
        ));

        let verification = config.verification.enabled.then(|| {
            VerificationGate::new(
                Arc::new(RpcProofVerifier::new(config.verification.rpc_url.clone())),
                config.verification.mode,
                config.verification.timeout(),
            )
        });

        let events: Arc<dyn EventPublisher> = Arc::new(LoggingEventPublisher::new());
        let disbursements: Arc<dyn DisbursementSink> = Arc::new(LoggingDisbursementSink::new());

        Self::with_collaborators(
            config,
            ledger,
            nft,
            clock,
            events,
            disbursements,
            verification,
        )
    }

    /// Build state from explicit collaborators (dependency injection for
    /// tests and alternative deployments).
    pub fn with_collaborators(
        config: &AppConfig,
        ledger: Arc<dyn LedgerRepository>,
        nft: Arc<dyn NftLookup>,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventPublisher>,
        disbursements: Arc<dyn DisbursementSink>,
        verification: Option<VerificationGate>,
    ) -> Self {
        let commands = Arc::new(StakeCommandService::new(
            ledger.clone(),
            nft,
            clock.clone(),
            events,
            disbursements,
            verification,
            config.staking.grid_charge_target,
        ));
        let queries = Arc::new(StakeQueryService::new(
            ledger,
            clock,
            config.staking.grid_charge_target,
        ));

        Self::new(commands, queries, config.staking.leaderboard_limit)
    }

    pub fn commands(&self) -> &StakeCommandService {
        &self.commands
    }

    pub fn queries(&self) -> &StakeQueryService {
        &self.queries
    }

    pub fn leaderboard_limit(&self) -> usize {
        self.leaderboard_limit
    }
}
