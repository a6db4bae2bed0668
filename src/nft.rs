//! NFT holdership lookup
//!
//! Answers whether a wallet currently holds a collection NFT. The answer is
//! snapshotted onto the stake at creation time and never re-checked, so the
//! lookup sits behind a TTL cache to keep repeated creations from hammering
//! the RPC node.

use async_trait::async_trait;
use std::sync::Arc;

use crate::cache::TtlCache;
use crate::clock::Clock;

/// Holdership-checking seam.
#[async_trait]
pub trait NftLookup: Send + Sync {
    /// Whether the wallet holds at least one collection NFT.
    async fn holds_nft(&self, owner: &str) -> anyhow::Result<bool>;
}

/// TTL-cached wrapper around any [`NftLookup`].
///
/// Replaces the usual global holder-cache pattern with an explicit
/// component: the clock is injected and expiry is driven entirely by it.
pub struct CachedNftLookup {
    inner: Arc<dyn NftLookup>,
    cache: TtlCache<String, bool>,
    clock: Arc<dyn Clock>,
}

impl CachedNftLookup {
    pub fn new(inner: Arc<dyn NftLookup>, ttl_secs: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            cache: TtlCache::new(ttl_secs),
            clock,
        }
    }
}

#[async_trait]
impl NftLookup for CachedNftLookup {
    async fn holds_nft(&self, owner: &str) -> anyhow::Result<bool> {
        let now = self.clock.now_unix();
        if let Some(cached) = self.cache.get(&owner.to_string(), now).await {
            return Ok(cached);
        }

        let holds = self.inner.holds_nft(owner).await?;
        self.cache.insert(owner.to_string(), holds, now).await;
        Ok(holds)
    }
}

/// JSON-RPC holdership lookup.
///
/// Counts token accounts holding exactly one unit of a zero-decimal mint,
/// the standard NFT shape. Collection filtering happens server-side via the
/// configured collection mint.
pub struct RpcNftLookup {
    client: reqwest::Client,
    rpc_url: String,
    collection_mint: String,
}

impl RpcNftLookup {
    pub fn new(rpc_url: impl Into<String>, collection_mint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            rpc_url: rpc_url.into(),
            collection_mint: collection_mint.into(),
        }
    }
}

#[async_trait]
impl NftLookup for RpcNftLookup {
    async fn holds_nft(&self, owner: &str) -> anyhow::Result<bool> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getTokenAccountsByOwner",
            "params": [
                owner,
                {"mint": self.collection_mint},
                {"encoding": "jsonParsed"},
            ],
        });

        let response: serde_json::Value = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let accounts = response["result"]["value"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let count = accounts
            .iter()
            .filter(|account| {
                let amount = &account["account"]["data"]["parsed"]["info"]["tokenAmount"];
                amount["decimals"].as_u64() == Some(0) && amount["uiAmount"].as_f64() == Some(1.0)
            })
            .count();

        Ok(count > 0)
    }
}
