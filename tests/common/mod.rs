//! Shared test doubles for integration tests.

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokengate::chain::{ChainError, ChainQuery, ChainResult, TransferDetails};
use tokengate::platform::{
    ChannelId, GuildId, PlatformResult, RoleId, RolePlatform, UserId,
};

/// Programmable chain double: transactions and balances are seeded by the
/// test, and balance queries can be made to fail per address.
#[derive(Clone, Default)]
pub struct MockChain {
    transactions: Arc<DashMap<TxHash, TransferDetails>>,
    balances: Arc<DashMap<Address, U256>>,
    failing_balances: Arc<DashMap<Address, ()>>,
    balance_delay: Arc<Mutex<Option<Duration>>>,
    balance_calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_transfer(&self, hash: TxHash, transfer: TransferDetails) {
        self.transactions.insert(hash, transfer);
    }

    pub fn set_balance(&self, owner: Address, balance: u64) {
        self.failing_balances.remove(&owner);
        self.balances.insert(owner, U256::from(balance));
    }

    /// Make every balance query for `owner` fail with an RPC error.
    pub fn fail_balance(&self, owner: Address) {
        self.failing_balances.insert(owner, ());
    }

    /// Make every balance query sleep before answering.
    pub fn set_balance_delay(&self, delay: Duration) {
        *self.balance_delay.lock().unwrap() = Some(delay);
    }

    /// Total balance queries served.
    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    /// Highest number of balance queries ever in flight at once.
    pub fn max_in_flight_balance_calls(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainQuery for MockChain {
    async fn get_transfer(&self, hash: TxHash) -> ChainResult<TransferDetails> {
        self.transactions
            .get(&hash)
            .map(|r| *r.value())
            .ok_or(ChainError::TxNotFound(hash))
    }

    async fn token_balance(&self, owner: Address) -> ChainResult<U256> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = *self.balance_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_balances.contains_key(&owner) {
            return Err(ChainError::Rpc("injected balance failure".to_string()));
        }
        Ok(self
            .balances
            .get(&owner)
            .map(|r| *r.value())
            .unwrap_or(U256::ZERO))
    }
}

/// In-memory chat platform double recording every effect.
#[derive(Clone, Default)]
pub struct MemoryPlatform {
    guilds: Vec<GuildId>,
    members: Arc<DashMap<(GuildId, RoleId), HashSet<UserId>>>,
    notifications: Arc<Mutex<Vec<(UserId, String)>>>,
    announcements: Arc<Mutex<Vec<(ChannelId, String)>>>,
}

#[allow(dead_code)]
impl MemoryPlatform {
    pub fn new(guilds: Vec<GuildId>) -> Self {
        Self {
            guilds,
            ..Self::default()
        }
    }

    /// Seed a role holder outside the engine (as if granted elsewhere).
    pub fn seed_holder(&self, guild: GuildId, user: UserId, role: RoleId) {
        self.members.entry((guild, role)).or_default().insert(user);
    }

    pub fn holds(&self, guild: GuildId, user: UserId, role: RoleId) -> bool {
        self.members
            .get(&(guild, role))
            .map(|r| r.value().contains(&user))
            .unwrap_or(false)
    }

    pub fn notifications_for(&self, user: UserId) -> Vec<String> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| *u == user)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn announcements(&self) -> Vec<(ChannelId, String)> {
        self.announcements.lock().unwrap().clone()
    }
}

#[async_trait]
impl RolePlatform for MemoryPlatform {
    async fn guilds(&self) -> PlatformResult<Vec<GuildId>> {
        Ok(self.guilds.clone())
    }

    async fn add_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<()> {
        // Idempotent: inserting a held role is a no-op.
        self.members.entry((guild, role)).or_default().insert(user);
        Ok(())
    }

    async fn remove_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<()> {
        // Idempotent: removing an unheld role is a no-op.
        if let Some(mut holders) = self.members.get_mut(&(guild, role)) {
            holders.remove(&user);
        }
        Ok(())
    }

    async fn has_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<bool> {
        Ok(self.holds(guild, user, role))
    }

    async fn role_holders(&self, guild: GuildId, role: RoleId) -> PlatformResult<Vec<UserId>> {
        let mut holders: Vec<UserId> = self
            .members
            .get(&(guild, role))
            .map(|r| r.value().iter().copied().collect())
            .unwrap_or_default();
        holders.sort_by_key(|u| u.0);
        Ok(holders)
    }

    async fn notify(&self, user: UserId, message: &str) -> PlatformResult<()> {
        self.notifications
            .lock()
            .unwrap()
            .push((user, message.to_string()));
        Ok(())
    }

    async fn announce(&self, channel: ChannelId, message: &str) -> PlatformResult<()> {
        self.announcements
            .lock()
            .unwrap()
            .push((channel, message.to_string()));
        Ok(())
    }
}
