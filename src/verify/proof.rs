//! Pure proof checks over observed transaction data.
//!
//! The chain itself is the verifier here: a same-account self-transfer of a
//! precise, unusual amount can only be authored by the key holder, so the
//! engine never touches signature logic. These functions only judge the
//! already-confirmed transaction.

use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, U256};

use crate::chain::TransferDetails;
use crate::verify::types::VerifyError;

/// Absolute tolerance on the proof amount, in display units.
///
/// Absorbs unit-conversion rounding, not user error: several orders of
/// magnitude below any sane minimum amount.
pub const AMOUNT_TOLERANCE: f64 = 1e-6;

/// Convert a wei value to display units of the native token.
pub fn wei_to_display(value: U256) -> f64 {
    format_ether(value).parse().unwrap_or(f64::NAN)
}

/// Require the transaction to be a self-transfer of `wallet`.
///
/// Contract creations (no recipient) can never qualify.
pub fn check_self_transfer(transfer: &TransferDetails, wallet: Address) -> Result<(), VerifyError> {
    match transfer.to {
        Some(to) if transfer.from == wallet && to == wallet => Ok(()),
        _ => Err(VerifyError::NotSelfTransfer),
    }
}

/// Require the transferred value to match `expected` within tolerance.
///
/// Returns the observed display-unit amount on success.
pub fn check_amount(value: U256, expected: f64) -> Result<f64, VerifyError> {
    let observed = wei_to_display(value);
    // Inverted comparison so a NaN conversion fails closed.
    if (observed - expected).abs() <= AMOUNT_TOLERANCE {
        Ok(observed)
    } else {
        Err(VerifyError::AmountMismatch { observed, expected })
    }
}
