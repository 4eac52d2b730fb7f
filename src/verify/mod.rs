//! Verification workflow subsystem.
//!
//! # Data Flow
//! ```text
//! submit_wallet (form input)
//!     → parse & checksum address → BindingStore
//! submit_proof (form input)
//!     → chain lookup → self-transfer check → amount check → balanceOf
//!     → RolePlatform (grant / deny) + user notification
//! ```
//!
//! # Design Decisions
//! - Checks run in a fixed order and short-circuit with the specific reason
//! - A failed check leaves the binding unchanged (retry with a new hash)
//! - Ownership is decided from a live contract call, never a cached answer

pub mod proof;
pub mod types;
pub mod workflow;

pub use proof::AMOUNT_TOLERANCE;
pub use types::{Verdict, VerifyError};
pub use workflow::{ProofPolicy, VerificationWorkflow};
