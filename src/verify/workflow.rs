//! The verification state machine.
//!
//! Drives a user through claim → proof → decision:
//!
//! ```text
//! Idle ──submit_wallet──▶ WalletClaimed ──submit_proof──▶ {Granted | Denied}
//! ```
//!
//! `Granted`/`Denied` are terminal for the attempt, not the user: a fresh
//! claim restarts from `Idle` and overwrites the binding. A failed proof
//! leaves the binding intact so the user can retry with a new hash without
//! re-claiming the wallet.

use alloy::primitives::{Address, TxHash, U256};
use std::sync::Arc;
use uuid::Uuid;

use crate::chain::{ChainError, ChainQuery};
use crate::config::VerificationConfig;
use crate::identity::BindingStore;
use crate::observability::metrics;
use crate::platform::{GuildId, RoleId, RolePlatform, UserId};
use crate::verify::proof;
use crate::verify::types::{Verdict, VerifyError};

/// The static policy a proof is judged against.
#[derive(Debug, Clone, Copy)]
pub struct ProofPolicy {
    /// Exact self-transfer amount required, in display units.
    pub min_transfer_amount: f64,
    /// Role granted to verified holders.
    pub role_id: RoleId,
}

impl ProofPolicy {
    /// Derive the policy from validated configuration.
    pub fn from_config(config: &VerificationConfig) -> Self {
        Self {
            min_transfer_amount: config.min_transfer_amount,
            role_id: RoleId(config.role_id),
        }
    }
}

/// The verification workflow engine.
///
/// One instance serves all users; per-attempt state is the path through the
/// checks, scoped to a single call. Overlapping attempts by one user are
/// last-write-wins on the binding, which is acceptable because every attempt
/// is validated against live chain state at decision time.
pub struct VerificationWorkflow {
    chain: Arc<dyn ChainQuery>,
    store: BindingStore,
    platform: Arc<dyn RolePlatform>,
    policy: ProofPolicy,
}

impl VerificationWorkflow {
    /// Create a new workflow over the given collaborators.
    pub fn new(
        chain: Arc<dyn ChainQuery>,
        store: BindingStore,
        platform: Arc<dyn RolePlatform>,
        policy: ProofPolicy,
    ) -> Self {
        Self {
            chain,
            store,
            platform,
            policy,
        }
    }

    /// The binding store this workflow writes to.
    pub fn store(&self) -> &BindingStore {
        &self.store
    }

    /// Handle a wallet-address form submission (`Idle → WalletClaimed`).
    ///
    /// On success the parsed address is bound (overwriting any prior claim)
    /// and the user receives the proof instructions. On a malformed address
    /// any prior binding is left untouched.
    pub async fn submit_wallet(&self, user: UserId, input: &str) -> Result<Address, VerifyError> {
        let wallet: Address = match input.trim().parse() {
            Ok(wallet) => wallet,
            Err(_) => {
                self.notify(user, "❌ Invalid wallet address.").await;
                return Err(VerifyError::InvalidAddress);
            }
        };

        let displaced = self.store.bind(user, wallet);
        let checksummed = wallet.to_checksum(None);
        tracing::info!(
            %user,
            wallet = %checksummed,
            rebound = displaced.is_some(),
            "wallet claimed"
        );

        self.notify(
            user,
            &format!(
                "✅ Wallet received: `{checksummed}`\n\
                 Send a self-transfer of exactly {amount} from that address to itself, \
                 then submit the transaction hash.",
                amount = self.policy.min_transfer_amount
            ),
        )
        .await;

        Ok(wallet)
    }

    /// Handle a transaction-hash form submission
    /// (`WalletClaimed → ProofSubmitted → {Granted | Denied}`).
    ///
    /// Runs the four checks in order; the first failure short-circuits with
    /// its specific reason, notified to the user verbatim.
    pub async fn submit_proof(
        &self,
        guild: GuildId,
        user: UserId,
        input: &str,
    ) -> Result<Verdict, VerifyError> {
        let attempt = Uuid::new_v4();

        let Some(wallet) = self.store.wallet(&user) else {
            metrics::record_verification("no_binding");
            self.notify(user, &format!("❌ {}.", VerifyError::NoBindingOnFile))
                .await;
            return Err(VerifyError::NoBindingOnFile);
        };

        match self.evaluate(wallet, input).await {
            Ok(Verdict::Granted) => {
                tracing::info!(%attempt, %user, wallet = %wallet, "proof accepted, granting role");
                metrics::record_verification("granted");
                self.apply_grant(guild, user).await;
                Ok(Verdict::Granted)
            }
            Ok(Verdict::Denied) => {
                tracing::info!(%attempt, %user, wallet = %wallet, "proof accepted but no token held");
                metrics::record_verification("denied");
                self.apply_denial(guild, user).await;
                Ok(Verdict::Denied)
            }
            Err(err) => {
                tracing::info!(%attempt, %user, wallet = %wallet, error = %err, "proof rejected");
                metrics::record_verification("rejected");
                self.notify(user, &format!("❌ {err}.")).await;
                Err(err)
            }
        }
    }

    /// Checks 1–4: lookup, self-transfer shape, exact amount, ownership.
    async fn evaluate(&self, wallet: Address, input: &str) -> Result<Verdict, VerifyError> {
        // An unparseable hash can never resolve to a transaction.
        let hash: TxHash = input
            .trim()
            .parse()
            .map_err(|_| VerifyError::TransactionNotFound)?;

        let transfer = match self.chain.get_transfer(hash).await {
            Ok(transfer) => transfer,
            Err(ChainError::TxNotFound(_)) => return Err(VerifyError::TransactionNotFound),
            Err(err) => return Err(VerifyError::Rpc(err)),
        };

        proof::check_self_transfer(&transfer, wallet)?;
        proof::check_amount(transfer.value, self.policy.min_transfer_amount)?;

        let balance = self
            .chain
            .token_balance(wallet)
            .await
            .map_err(VerifyError::Rpc)?;

        if balance >= U256::from(1u8) {
            Ok(Verdict::Granted)
        } else {
            Ok(Verdict::Denied)
        }
    }

    async fn apply_grant(&self, guild: GuildId, user: UserId) {
        match self
            .platform
            .add_role(guild, user, self.policy.role_id)
            .await
        {
            Ok(()) => {
                self.notify(user, "✅ NFT verified! You have been given the verified role.")
                    .await;
            }
            Err(err) => {
                tracing::warn!(%guild, %user, error = %err, "failed to add role after grant");
                self.notify(user, "⚠️ Verified, but applying the role failed. Please try again.")
                    .await;
            }
        }
    }

    async fn apply_denial(&self, guild: GuildId, user: UserId) {
        let role = self.policy.role_id;
        match self.platform.has_role(guild, user, role).await {
            Ok(true) => {
                if let Err(err) = self.platform.remove_role(guild, user, role).await {
                    tracing::warn!(%guild, %user, error = %err, "failed to remove role after denial");
                }
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(%guild, %user, error = %err, "failed to check role after denial");
            }
        }
        self.notify(user, "❌ NFT not found in your wallet. Role not assigned.")
            .await;
    }

    async fn notify(&self, user: UserId, message: &str) {
        if let Err(err) = self.platform.notify(user, message).await {
            tracing::warn!(%user, error = %err, "failed to notify user");
        }
    }
}

impl std::fmt::Debug for VerificationWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationWorkflow")
            .field("policy", &self.policy)
            .field("bindings", &self.store.len())
            .finish()
    }
}
