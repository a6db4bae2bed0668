//! Centralized application configuration
//!
//! Single source of truth for all application configuration, supporting
//! both TOML files and environment variables with sensible defaults and
//! validation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants;
use crate::verification::VerificationMode;

/// Default values for configuration
mod defaults {
    use crate::constants;
    use crate::verification::VerificationMode;

    // Network defaults
    pub fn http_port() -> u16 {
        5000
    }
    pub fn http_bind_addr() -> String {
        "0.0.0.0".to_string()
    }

    // Staking defaults
    pub fn grid_charge_target() -> u64 {
        constants::DEFAULT_GRID_CHARGE_TARGET
    }
    pub fn nft_cache_ttl_secs() -> u64 {
        constants::DEFAULT_NFT_CACHE_TTL_SECS
    }
    pub fn leaderboard_limit() -> usize {
        constants::DEFAULT_LEADERBOARD_LIMIT
    }

    // Verification defaults
    pub fn verification_enabled() -> bool {
        false
    }
    pub fn rpc_url() -> String {
        "https://api.mainnet-beta.solana.com".to_string()
    }
    pub fn collection_mint() -> String {
        String::new()
    }
    pub fn verification_timeout_secs() -> u64 {
        constants::DEFAULT_VERIFICATION_TIMEOUT_SECS
    }
    pub fn verification_mode() -> VerificationMode {
        VerificationMode::Lenient
    }
}

/// Network-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// HTTP server port
    #[serde(default = "defaults::http_port")]
    pub http_port: u16,
    /// HTTP server bind address
    #[serde(default = "defaults::http_bind_addr")]
    pub http_bind_addr: String,
}

impl NetworkConfig {
    /// Load network configuration from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let http_port = match std::env::var("HTTP_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "HTTP_PORT".to_string(),
                value: raw.clone(),
                reason: format!("must be a valid port number (0-65535): {}", e),
            })?,
            Err(_) => defaults::http_port(),
        };

        Ok(Self {
            http_port,
            http_bind_addr: std::env::var("HTTP_BIND_ADDR")
                .unwrap_or_else(|_| defaults::http_bind_addr()),
        })
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::http_port(),
            http_bind_addr: defaults::http_bind_addr(),
        }
    }
}

/// Staking engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakingConfig {
    /// Aggregate active principal at which the grid boost activates
    #[serde(default = "defaults::grid_charge_target")]
    pub grid_charge_target: u64,
    /// TTL for cached NFT-holdership lookups (seconds)
    #[serde(default = "defaults::nft_cache_ttl_secs")]
    pub nft_cache_ttl_secs: u64,
    /// Default row count for the leaderboard
    #[serde(default = "defaults::leaderboard_limit")]
    pub leaderboard_limit: usize,
}

impl StakingConfig {
    /// Load staking configuration from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let grid_charge_target = match std::env::var("GRID_CHARGE_TARGET") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                key: "GRID_CHARGE_TARGET".to_string(),
                value: raw.clone(),
                reason: format!("must be a non-negative integer: {}", e),
            })?,
            Err(_) => defaults::grid_charge_target(),
        };

        Ok(Self {
            grid_charge_target,
            nft_cache_ttl_secs: std::env::var("NFT_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(defaults::nft_cache_ttl_secs),
            leaderboard_limit: std::env::var("LEADERBOARD_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(defaults::leaderboard_limit),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_charge_target == 0 {
            return Err(ConfigError::InvalidValue {
                key: "GRID_CHARGE_TARGET".to_string(),
                value: "0".to_string(),
                reason: "a zero target would keep the boost permanently active".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            grid_charge_target: defaults::grid_charge_target(),
            nft_cache_ttl_secs: defaults::nft_cache_ttl_secs(),
            leaderboard_limit: defaults::leaderboard_limit(),
        }
    }
}

/// Proof-verification gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Whether the gate is wired up at all
    #[serde(default = "defaults::verification_enabled")]
    pub enabled: bool,
    /// JSON-RPC endpoint for transaction lookups and NFT queries
    #[serde(default = "defaults::rpc_url")]
    pub rpc_url: String,
    /// Collection mint used for NFT-holdership checks
    #[serde(default = "defaults::collection_mint")]
    pub collection_mint: String,
    /// Upper bound on each verifier call (seconds)
    #[serde(default = "defaults::verification_timeout_secs")]
    pub timeout_secs: u64,
    /// What to do when the verifier errors or times out
    #[serde(default = "defaults::verification_mode")]
    pub mode: VerificationMode,
}

impl VerificationConfig {
    /// Load verification configuration from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let mode = match std::env::var("VERIFICATION_MODE") {
            Ok(raw) => match raw.as_str() {
                "strict" => VerificationMode::Strict,
                "lenient" => VerificationMode::Lenient,
                other => {
                    return Err(ConfigError::InvalidValue {
                        key: "VERIFICATION_MODE".to_string(),
                        value: other.to_string(),
                        reason: "must be \"strict\" or \"lenient\"".to_string(),
                    })
                }
            },
            Err(_) => defaults::verification_mode(),
        };

        Ok(Self {
            enabled: std::env::var("VERIFICATION_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(defaults::verification_enabled),
            rpc_url: std::env::var("SOLANA_RPC").unwrap_or_else(|_| defaults::rpc_url()),
            collection_mint: std::env::var("NFT_COLLECTION_MINT")
                .unwrap_or_else(|_| defaults::collection_mint()),
            timeout_secs: std::env::var("VERIFICATION_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(defaults::verification_timeout_secs),
            mode,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::verification_enabled(),
            rpc_url: defaults::rpc_url(),
            collection_mint: defaults::collection_mint(),
            timeout_secs: defaults::verification_timeout_secs(),
            mode: defaults::verification_mode(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub staking: StakingConfig,
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl AppConfig {
    /// Load complete application configuration from environment variables
    ///
    /// Validates all configuration values; every optional value has a
    /// sensible default.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self {
            network: NetworkConfig::load()?,
            staking: StakingConfig::load()?,
            verification: VerificationConfig::load()?,
        };
        config.staking.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::InvalidValue {
                key: "config_file".to_string(),
                value: path.as_ref().display().to_string(),
                reason: format!("Failed to read file: {}", e),
            })?;

        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::InvalidValue {
                key: "config_file".to_string(),
                value: path.as_ref().display().to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;
        config.staking.validate()?;
        Ok(config)
    }

    /// Load from a TOML file if one is given and exists, otherwise from
    /// environment variables.
    pub fn load_with_optional_file(
        path: Option<impl AsRef<std::path::Path>>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            if path.as_ref().exists() {
                tracing::info!(
                    "Loading configuration from file: {}",
                    path.as_ref().display()
                );
                return Self::from_toml_file(path);
            }
        }

        tracing::info!("Loading configuration from environment variables");
        Self::load()
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// A configuration value is invalid
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
    /// A required configuration value is missing
    MissingRequired { key: String, hint: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value for {}: {:?} ({})", key, value, reason)
            }
            Self::MissingRequired { key, hint } => {
                write!(f, "missing required configuration {}: {}", key, hint)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.staking.validate().is_ok());
        assert_eq!(config.staking.grid_charge_target, 200_000_000);
        assert_eq!(config.verification.mode, VerificationMode::Lenient);
        assert!(!config.verification.enabled);
    }

    #[test]
    fn zero_charge_target_is_rejected() {
        let staking = StakingConfig {
            grid_charge_target: 0,
            ..StakingConfig::default()
        };
        assert!(staking.validate().is_err());
    }

    #[test]
    fn toml_round_trip() {
        let toml = r#"
            [network]
            http_port = 8080

            [staking]
            grid_charge_target = 1000

            [verification]
            enabled = true
            mode = "strict"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.network.http_port, 8080);
        assert_eq!(config.staking.grid_charge_target, 1_000);
        assert_eq!(config.verification.mode, VerificationMode::Strict);
        // Unset fields fall back to defaults.
        assert_eq!(config.staking.nft_cache_ttl_secs, 300);
    }
}
