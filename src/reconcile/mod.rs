//! Reconciliation subsystem.
//!
//! # Data Flow
//! ```text
//! timer tick (fixed period, skip-not-stack)
//!     → role holders per guild (RolePlatform)
//!     → binding lookup (BindingStore, read-only)
//!     → live balanceOf (ChainQuery)
//!     → revoke on zero balance (RolePlatform)
//! ```
//!
//! # Design Decisions
//! - Failure isolation per member is mandatory
//! - Never revoke on ambiguous information (query failure = skip)
//! - Revoke-only: re-grants happen exclusively via the workflow

pub mod sweeper;

pub use sweeper::{Reconciler, SweepStats};
