//! In-memory wallet binding storage.

use alloy::primitives::Address;
use dashmap::DashMap;
use std::sync::Arc;

use crate::observability::metrics;
use crate::platform::UserId;

/// A thread-safe store mapping each chat identity to its claimed wallet.
///
/// At most one binding per user: a new claim displaces the prior one, no
/// history is kept. Addresses are held parsed, so two differently-cased
/// inputs of the same address produce byte-identical bindings.
///
/// The workflow is the single writer; the reconciler only reads.
#[derive(Clone, Default)]
pub struct BindingStore {
    inner: Arc<DashMap<UserId, Address>>,
}

impl BindingStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Bind a wallet to a user, returning the displaced prior binding.
    pub fn bind(&self, user: UserId, wallet: Address) -> Option<Address> {
        let prior = self.inner.insert(user, wallet);
        metrics::record_bound_wallets(self.inner.len());
        prior
    }

    /// Look up the wallet bound to a user.
    pub fn wallet(&self, user: &UserId) -> Option<Address> {
        self.inner.get(user).map(|r| *r.value())
    }

    /// Number of bindings on file.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the store holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for BindingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingStore")
            .field("bindings", &self.inner.len())
            .finish()
    }
}
