//! The chat platform boundary trait.

use async_trait::async_trait;

use crate::platform::types::{ChannelId, GuildId, PlatformResult, RoleId, UserId};

/// Role mutation and messaging calls against the chat platform.
///
/// All role mutations must be idempotent at this boundary: adding an
/// already-held role or removing an unheld one is a no-op, never an error.
/// The engine relies on that to keep grant and revoke paths retry-safe.
#[async_trait]
pub trait RolePlatform: Send + Sync {
    /// List the guilds the bot is present in.
    async fn guilds(&self) -> PlatformResult<Vec<GuildId>>;

    /// Grant a role to a user.
    async fn add_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<()>;

    /// Remove a role from a user.
    async fn remove_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<()>;

    /// Whether the user currently holds the role.
    async fn has_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<bool>;

    /// Current holders of a role in a guild.
    async fn role_holders(&self, guild: GuildId, role: RoleId) -> PlatformResult<Vec<UserId>>;

    /// Send a private message to a user.
    async fn notify(&self, user: UserId, message: &str) -> PlatformResult<()>;

    /// Post a message in a channel.
    async fn announce(&self, channel: ChannelId, message: &str) -> PlatformResult<()>;
}
