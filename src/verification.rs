//! Proof verification gate
//!
//! Optional external check invoked before honoring a stake-creation
//! request: the caller supplies an opaque proof reference (a transaction
//! signature) and the verifier answers whether it is valid. The gate
//! bounds every verifier call with a timeout and supports two failure
//! policies:
//!
//! - **Strict**: a verifier outage or timeout rejects the request.
//! - **Lenient**: a verifier outage logs a warning and lets the request
//!   through; only an explicit `valid = false` answer rejects.
//!
//! A definitive negative answer is fatal in both modes. The policy is
//! configuration, never hard-coded.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::{StakeError, StakeResult};

/// Outcome of a proof check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub valid: bool,
    pub reason: Option<String>,
}

impl Verification {
    pub fn valid() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// External proof-checking seam.
#[async_trait]
pub trait ProofVerifier: Send + Sync {
    async fn verify(&self, proof_ref: &str) -> anyhow::Result<Verification>;
}

/// What to do when the verifier itself errors or times out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMode {
    Strict,
    Lenient,
}

/// Policy wrapper around a [`ProofVerifier`].
#[derive(Clone)]
pub struct VerificationGate {
    verifier: Arc<dyn ProofVerifier>,
    mode: VerificationMode,
    timeout: Duration,
}

impl VerificationGate {
    pub fn new(verifier: Arc<dyn ProofVerifier>, mode: VerificationMode, timeout: Duration) -> Self {
        Self {
            verifier,
            mode,
            timeout,
        }
    }

    /// Run the proof check under the configured timeout and policy.
    pub async fn check(&self, proof_ref: &str) -> StakeResult<()> {
        let outcome = tokio::time::timeout(self.timeout, self.verifier.verify(proof_ref)).await;

        match outcome {
            Ok(Ok(verification)) if verification.valid => Ok(()),
            Ok(Ok(verification)) => Err(StakeError::VerificationFailed {
                reason: verification
                    .reason
                    .unwrap_or_else(|| "proof rejected".to_string()),
            }),
            Ok(Err(err)) => self.degraded(proof_ref, &format!("verifier error: {}", err)),
            Err(_) => self.degraded(
                proof_ref,
                &format!("verifier timed out after {:?}", self.timeout),
            ),
        }
    }

    fn degraded(&self, proof_ref: &str, reason: &str) -> StakeResult<()> {
        match self.mode {
            VerificationMode::Strict => Err(StakeError::VerificationFailed {
                reason: reason.to_string(),
            }),
            VerificationMode::Lenient => {
                tracing::warn!(
                    proof_ref = %proof_ref,
                    reason = %reason,
                    "Verification unavailable, proceeding in lenient mode"
                );
                Ok(())
            }
        }
    }
}

/// JSON-RPC transaction verifier.
///
/// Looks a transaction up by signature at the configured RPC endpoint and
/// accepts it when the node knows it and it did not fail on-chain.
pub struct RpcProofVerifier {
    client: reqwest::Client,
    rpc_url: String,
}

impl RpcProofVerifier {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            rpc_url: rpc_url.into(),
        }
    }
}

#[async_trait]
impl ProofVerifier for RpcProofVerifier {
    async fn verify(&self, proof_ref: &str) -> anyhow::Result<Verification> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getTransaction",
            "params": [proof_ref, {"commitment": "confirmed", "maxSupportedTransactionVersion": 0}],
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

        let result = &response["result"];
        if result.is_null() {
            return Ok(Verification::invalid("transaction not found"));
        }
        if !result["meta"]["err"].is_null() {
            return Ok(Verification::invalid("transaction failed"));
        }
        Ok(Verification::valid())
    }
}
