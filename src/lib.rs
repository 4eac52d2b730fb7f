//! tokengate: NFT-gated role verification engine.
//!
//! Grants and revokes a privileged membership role based on a user's proven
//! control of a wallet and that wallet's current ownership of a gating NFT.
//!
//! # Architecture Overview
//!
//! ```text
//!   user form input                  ┌──────────────────────────────┐
//!   ─────────────────────────────▶  │   verify (state machine)      │
//!                                   │  claim → proof → decision     │
//!                                   └───────┬───────────┬──────────┘
//!                                           │           │
//!                              binding      │           │ grant / deny
//!                                   ┌───────▼──────┐ ┌──▼───────────┐
//!                                   │   identity   │ │   platform   │
//!                                   │ BindingStore │ │ RolePlatform │
//!                                   └───────▲──────┘ └──▲───────────┘
//!                                           │           │ revoke
//!                                   ┌───────┴───────────┴──────────┐
//!   timer tick ──────────────────▶  │   reconcile (sweep loop)      │
//!                                   └───────────────┬──────────────┘
//!                                                   │ live reads
//!                                   ┌───────────────▼──────────────┐
//!                                   │   chain (RPC client)          │
//!                                   └──────────────────────────────┘
//! ```
//!
//! Steady-state data flows one direction: user input → workflow → chain
//! reads → role effector. The reconciler independently re-enters the same
//! chain and effector path on a fixed period, bounding the staleness of
//! "verified" to one sweep.

// Core subsystems
pub mod chain;
pub mod config;
pub mod identity;
pub mod platform;
pub mod reconcile;
pub mod verify;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use chain::{ChainClient, ChainQuery};
pub use config::GateConfig;
pub use identity::BindingStore;
pub use lifecycle::Shutdown;
pub use platform::RolePlatform;
pub use reconcile::Reconciler;
pub use verify::VerificationWorkflow;
