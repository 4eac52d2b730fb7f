//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate
//! engine. All types derive Serde traits for deserialization from config
//! files, and every section has defaults so a minimal config is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the token gate engine.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Blockchain RPC settings.
    pub chain: ChainConfig,

    /// Verification policy (contract, proof amount, target role).
    pub verification: VerificationConfig,

    /// Reconciliation sweep settings.
    pub reconciler: ReconcilerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Blockchain RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Chain ID (10143 for Monad testnet).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://testnet-rpc.monad.xyz".to_string(),
            failover_urls: Vec::new(),
            chain_id: 10143,
            rpc_timeout_secs: 5,
        }
    }
}

/// Verification policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Address of the gating NFT contract.
    pub contract_address: String,

    /// Exact self-transfer amount required as proof of wallet control,
    /// in display units of the native token.
    pub min_transfer_amount: f64,

    /// Identifier of the role granted to verified holders.
    pub role_id: u64,

    /// Channel where the entry prompt is announced on startup.
    pub prompt_channel_id: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            contract_address: String::new(),
            min_transfer_amount: 0.01,
            role_id: 0,
            prompt_channel_id: 0,
        }
    }
}

/// Reconciliation sweep configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Enable the periodic ownership re-check.
    pub enabled: bool,

    /// Sweep period in seconds.
    pub interval_secs: u64,

    /// Maximum in-flight ownership checks per guild during a sweep.
    pub max_concurrent_checks: usize,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 60,
            max_concurrent_checks: 4,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
