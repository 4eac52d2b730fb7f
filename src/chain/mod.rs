//! Chain query subsystem.
//!
//! # Data Flow
//! ```text
//! Config (RPC URLs, contract address)
//!     → client.rs (RPC connection with timeouts, failover)
//!     → get_transfer / token_balance (read-only queries)
//! ```
//!
//! # Constraints
//! - Strictly read-only: the engine never signs or broadcasts transactions
//! - All RPC calls have configurable timeouts
//! - Ownership answers are never cached; every decision is a live query
//! - Graceful degradation when the chain is unreachable

pub mod client;
pub mod types;

pub use client::{ChainClient, ChainQuery};
pub use types::{ChainConfig, ChainError, ChainId, ChainResult, TransferDetails};
