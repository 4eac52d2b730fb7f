//! Verification workflow types and error taxonomy.

use thiserror::Error;

use crate::chain::ChainError;

/// Outcome of a completed verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Proof accepted and wallet holds the token; role granted.
    Granted,
    /// Proof accepted but wallet holds no token; role denied (and removed
    /// if currently held).
    Denied,
}

/// Errors terminal for a verification attempt.
///
/// Display strings double as the user-visible reason: every input-path
/// failure is surfaced verbatim, never as a generic error.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The submitted wallet string is not a well-formed address.
    #[error("invalid wallet address")]
    InvalidAddress,

    /// No wallet is bound for this user; the claim step was skipped.
    #[error("wallet address not found, start again by submitting your wallet")]
    NoBindingOnFile,

    /// The submitted hash does not resolve to a transaction on chain.
    #[error("could not find that transaction on chain")]
    TransactionNotFound,

    /// The transaction is not a self-transfer of the bound wallet.
    #[error("transaction must be a self-transfer from and to your bound wallet")]
    NotSelfTransfer,

    /// The transferred value is outside the required amount tolerance.
    #[error("you sent {observed:.6}, must be exactly {expected}")]
    AmountMismatch { observed: f64, expected: f64 },

    /// Transient chain failure; the user may simply retry.
    #[error("chain query failed, please try again ({0})")]
    Rpc(ChainError),
}
