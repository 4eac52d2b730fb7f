//! Chain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoint
//! - Fetch transactions by hash
//! - Call the gating contract's balanceOf method
//! - Handle timeouts and network errors gracefully
//! - Provide health check for chain connectivity

use alloy::consensus::Transaction as _;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;

use crate::chain::types::{ChainConfig, ChainError, ChainId, ChainResult, TransferDetails};
use crate::observability::metrics;

sol! {
    #[sol(rpc)]
    contract Erc721 {
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// The two read-only chain operations the engine needs.
///
/// Implemented by [`ChainClient`] against a live node; test code substitutes
/// a programmable double.
#[async_trait]
pub trait ChainQuery: Send + Sync {
    /// Fetch a transaction's transfer details by hash.
    async fn get_transfer(&self, hash: TxHash) -> ChainResult<TransferDetails>;

    /// Query the gating contract's balanceOf for an owner address.
    async fn token_balance(&self, owner: Address) -> ChainResult<U256>;
}

/// Chain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct ChainClient {
    /// List of providers (primary + failovers).
    providers: Vec<DynProvider>,
    /// Address of the gating NFT contract.
    contract: Address,
    /// Configuration.
    config: ChainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a new chain client bound to one gating contract.
    ///
    /// Initialization succeeds even when the node is unreachable; chain ID
    /// verification failure is logged, not fatal.
    pub async fn new(config: ChainConfig, contract: Address) -> ChainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        // 1. Add primary provider
        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            ChainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        providers.push(ProviderBuilder::new().connect_http(primary_url).erased());

        // 2. Add failover providers
        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(ProviderBuilder::new().connect_http(url).erased());
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        let client = Self {
            providers,
            contract,
            config: config.clone(),
            timeout_duration,
        };

        // Verify chain ID matches configuration
        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %config.rpc_url,
                    chain_id = config.chain_id,
                    contract = %contract,
                    "Chain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Chain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(ChainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> ChainResult<ChainId> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_chain_id();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(ChainId(result)),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        Err(ChainError::Rpc("All RPC providers failed".to_string()))
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> ChainResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_block_number();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc("All providers failed to get block number".to_string()))
    }

    /// Check if the chain is reachable and healthy.
    ///
    /// Returns true if we can query the block number.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self.get_block_number().await.is_ok();
        metrics::record_rpc_health(healthy);
        healthy
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Get the gating contract address.
    pub fn contract(&self) -> Address {
        self.contract
    }
}

#[async_trait]
impl ChainQuery for ChainClient {
    async fn get_transfer(&self, hash: TxHash) -> ChainResult<TransferDetails> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_transaction_by_hash(hash);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(Some(tx))) => {
                    return Ok(TransferDetails {
                        from: tx.inner.signer(),
                        to: tx.to(),
                        value: tx.value(),
                    });
                }
                Ok(Ok(None)) => return Err(ChainError::TxNotFound(hash)),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        Err(ChainError::Rpc("All providers failed to get transaction".to_string()))
    }

    async fn token_balance(&self, owner: Address) -> ChainResult<U256> {
        for (i, provider) in self.providers.iter().enumerate() {
            let contract = Erc721::new(self.contract, provider.clone());
            let call = contract.balanceOf(owner);
            match timeout(self.timeout_duration, call.call()).await {
                Ok(Ok(balance)) => return Ok(balance),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "balanceOf call failed, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "balanceOf call timed out, trying next provider");
                }
            }
        }
        Err(ChainError::Rpc("All providers failed to call balanceOf".to_string()))
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("contract", &self.contract)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
