//! Platform identifier newtypes and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque stable identifier for a chat identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// Identifier for a guild (community instance) the bot is present in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildId(pub u64);

/// Identifier for a membership role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(pub u64);

/// Identifier for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

macro_rules! impl_id_display {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<u64> for $ty {
                fn from(id: u64) -> Self {
                    Self(id)
                }
            }
        )*
    };
}

impl_id_display!(UserId, GuildId, RoleId, ChannelId);

/// Errors surfaced by the chat platform boundary.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The platform API rejected or failed the call.
    #[error("platform API error: {0}")]
    Api(String),

    /// The user is not a member of the guild.
    #[error("unknown user {0}")]
    UnknownUser(UserId),
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
