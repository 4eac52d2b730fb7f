//! Identity binding subsystem.
//!
//! Single source of truth for "which wallet does this user claim".
//! Process-lifetime only: bindings do not survive a restart, and a binding
//! orphaned by a departed user is harmless since reconciliation is keyed by
//! current role holders.

pub mod store;

pub use store::BindingStore;
