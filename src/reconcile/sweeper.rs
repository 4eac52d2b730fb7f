//! Periodic ownership re-check over current role holders.

use alloy::primitives::U256;
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

use crate::chain::ChainQuery;
use crate::config::ReconcilerConfig;
use crate::identity::BindingStore;
use crate::observability::metrics;
use crate::platform::{GuildId, RoleId, RolePlatform, UserId};

/// Counters for one full sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Holders whose ownership was re-checked.
    pub checked: usize,
    /// Roles revoked for lapsed ownership.
    pub revoked: usize,
    /// Holders skipped for lack of a binding.
    pub skipped: usize,
    /// Per-member failures (logged, never aborting the sweep).
    pub errors: usize,
}

impl SweepStats {
    fn merge(&mut self, other: SweepStats) {
        self.checked += other.checked;
        self.revoked += other.revoked;
        self.skipped += other.skipped;
        self.errors += other.errors;
    }
}

/// What happened to one member during a sweep.
enum MemberOutcome {
    /// Still holds the token; no action.
    Compliant,
    /// No token held; role revoked.
    Revoked,
    /// No binding on file; left as is (no evidence of non-ownership).
    NoBinding,
    /// Query or effector failure; member skipped for this tick.
    Failed,
}

/// The reconciliation loop.
///
/// Bounds the staleness of "verified" status to one sweep period: the only
/// autonomous consistency mechanism in the engine. It only ever revokes;
/// grants happen exclusively through the workflow.
pub struct Reconciler {
    chain: Arc<dyn ChainQuery>,
    store: BindingStore,
    platform: Arc<dyn RolePlatform>,
    role_id: RoleId,
    enabled: bool,
    period: Duration,
    max_concurrent: usize,
}

impl Reconciler {
    /// Create a new reconciler.
    pub fn new(
        chain: Arc<dyn ChainQuery>,
        store: BindingStore,
        platform: Arc<dyn RolePlatform>,
        config: &ReconcilerConfig,
        role_id: RoleId,
    ) -> Self {
        Self {
            chain,
            store,
            platform,
            role_id,
            enabled: config.enabled,
            period: Duration::from_secs(config.interval_secs),
            max_concurrent: config.max_concurrent_checks.max(1),
        }
    }

    /// Run the sweep loop until shutdown.
    ///
    /// An overrunning sweep skips to the next period; two sweeps never run
    /// concurrently.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if !self.enabled {
            tracing::info!("reconciler disabled");
            return;
        }

        tracing::info!(period_secs = self.period.as_secs(), "starting reconciler");

        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let stats = self.sweep().await;
                    tracing::info!(
                        checked = stats.checked,
                        revoked = stats.revoked,
                        skipped = stats.skipped,
                        errors = stats.errors,
                        "sweep complete"
                    );
                    metrics::record_sweep(stats.revoked as u64, stats.errors as u64);
                }
                _ = shutdown.recv() => {
                    tracing::info!("reconciler shutting down");
                    break;
                }
            }
        }
    }

    /// One full pass over all guilds and role holders.
    pub async fn sweep(&self) -> SweepStats {
        let mut stats = SweepStats::default();

        let guilds = match self.platform.guilds().await {
            Ok(guilds) => guilds,
            Err(err) => {
                tracing::warn!(error = %err, "failed to list guilds, skipping sweep");
                stats.errors += 1;
                return stats;
            }
        };

        for guild in guilds {
            stats.merge(self.sweep_guild(guild).await);
        }
        stats
    }

    /// Re-check every holder of the verified role in one guild.
    ///
    /// Holders are checked with bounded concurrency; one member's slow or
    /// failing query never blocks or fails the others.
    async fn sweep_guild(&self, guild: GuildId) -> SweepStats {
        let mut stats = SweepStats::default();

        let holders = match self.platform.role_holders(guild, self.role_id).await {
            Ok(holders) => holders,
            Err(err) => {
                tracing::warn!(%guild, error = %err, "failed to list role holders, skipping guild");
                stats.errors += 1;
                return stats;
            }
        };

        let outcomes: Vec<MemberOutcome> = stream::iter(holders)
            .map(|user| self.check_member(guild, user))
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                MemberOutcome::Compliant => stats.checked += 1,
                MemberOutcome::Revoked => {
                    stats.checked += 1;
                    stats.revoked += 1;
                }
                MemberOutcome::NoBinding => stats.skipped += 1,
                MemberOutcome::Failed => stats.errors += 1,
            }
        }
        stats
    }

    /// Decide and apply the action for a single role holder.
    async fn check_member(&self, guild: GuildId, user: UserId) -> MemberOutcome {
        let Some(wallet) = self.store.wallet(&user) else {
            // Granted outside this engine's bookkeeping, or bookkeeping was
            // lost: no evidence of non-ownership, leave the role in place.
            tracing::debug!(%guild, %user, "no binding on file, skipping");
            return MemberOutcome::NoBinding;
        };

        let balance = match self.chain.token_balance(wallet).await {
            Ok(balance) => balance,
            Err(err) => {
                // Fail safe: never revoke on ambiguous information.
                tracing::warn!(%guild, %user, error = %err, "ownership re-check failed, skipping member");
                return MemberOutcome::Failed;
            }
        };

        if balance >= U256::from(1u8) {
            return MemberOutcome::Compliant;
        }

        match self.platform.remove_role(guild, user, self.role_id).await {
            Ok(()) => {
                tracing::info!(%guild, %user, wallet = %wallet, "revoked role, no token held");
                MemberOutcome::Revoked
            }
            Err(err) => {
                tracing::warn!(%guild, %user, error = %err, "failed to revoke role");
                MemberOutcome::Failed
            }
        }
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("role_id", &self.role_id)
            .field("period", &self.period)
            .field("max_concurrent", &self.max_concurrent)
            .finish()
    }
}
