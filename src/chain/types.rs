//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

// Re-export ChainConfig from config module to avoid duplication
pub use crate::config::schema::ChainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during chain queries.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction does not exist on chain.
    #[error("transaction {0} not found")]
    TxNotFound(TxHash),

    /// Chain configuration mismatch.
    #[error("chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// The fields of an on-chain transaction the engine inspects.
///
/// `to` is `None` for contract-creation transactions, which can never be
/// self-transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferDetails {
    /// Sender address (recovered signer).
    pub from: Address,
    /// Recipient address, if any.
    pub to: Option<Address>,
    /// Transferred value in the chain's base unit (wei).
    pub value: U256,
}
