//! Log-only platform adapter.

use async_trait::async_trait;

use crate::platform::effector::RolePlatform;
use crate::platform::types::{ChannelId, GuildId, PlatformResult, RoleId, UserId};

/// Stand-in adapter that logs every platform effect instead of performing it.
///
/// This is the seam where a concrete chat backend (Discord, Slack, Matrix)
/// is wired. Until one is, the binary runs against this adapter so the
/// engine's decisions remain fully observable in the logs.
#[derive(Debug, Clone, Default)]
pub struct LoggingPlatform;

#[async_trait]
impl RolePlatform for LoggingPlatform {
    async fn guilds(&self) -> PlatformResult<Vec<GuildId>> {
        Ok(Vec::new())
    }

    async fn add_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<()> {
        tracing::info!(%guild, %user, %role, "would add role");
        Ok(())
    }

    async fn remove_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<()> {
        tracing::info!(%guild, %user, %role, "would remove role");
        Ok(())
    }

    async fn has_role(&self, _guild: GuildId, _user: UserId, _role: RoleId) -> PlatformResult<bool> {
        Ok(false)
    }

    async fn role_holders(&self, _guild: GuildId, _role: RoleId) -> PlatformResult<Vec<UserId>> {
        Ok(Vec::new())
    }

    async fn notify(&self, user: UserId, message: &str) -> PlatformResult<()> {
        tracing::info!(%user, message, "would notify user");
        Ok(())
    }

    async fn announce(&self, channel: ChannelId, message: &str) -> PlatformResult<()> {
        tracing::info!(%channel, message, "would announce in channel");
        Ok(())
    }
}
