//! Event publisher implementations
//!
//! Concrete implementations of the EventPublisher trait for logging,
//! in-memory capture (tests), and discarding.

use async_trait::async_trait;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::events::{DomainEvent, EventPublisher};

/// In-memory event publisher for testing and development
///
/// Stores all published events in memory; events are lost on restart.
#[derive(Clone)]
pub struct InMemoryEventPublisher {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all published events (for testing)
    pub async fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().await.clone()
    }

    /// Get events for a specific stake (for testing)
    pub async fn events_for_stake(&self, stake_id: Uuid) -> Vec<DomainEvent> {
        self.events
            .lock()
            .await
            .iter()
            .filter(|e| e.stake_id() == stake_id)
            .cloned()
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.events.lock().await.len()
    }
}

impl Default for InMemoryEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: DomainEvent) -> Result<()> {
        tracing::debug!(event = ?event, "Event published: {}", event.description());
        self.events.lock().await.push(event);
        Ok(())
    }
}

/// Logging event publisher
///
/// Publishes events to the tracing subscriber, giving a production audit
/// trail correlated with application logs.
#[derive(Clone)]
pub struct LoggingEventPublisher;

impl LoggingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: DomainEvent) -> Result<()> {
        tracing::info!(
            stake_id = %event.stake_id(),
            timestamp = event.timestamp(),
            "Domain event: {}",
            event.description()
        );
        Ok(())
    }
}

/// No-op event publisher (does nothing)
#[derive(Clone)]
pub struct NoOpEventPublisher;

impl NoOpEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: DomainEvent) -> Result<()> {
        Ok(())
    }
}
