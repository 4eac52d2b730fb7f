//! Chat platform boundary.
//!
//! The engine treats the chat platform as an opaque collaborator: present
//! forms, receive input, mutate roles, send notifications. Everything behind
//! [`RolePlatform`] is delivery mechanics the engine does not own.

pub mod effector;
pub mod logging;
pub mod types;

pub use effector::RolePlatform;
pub use logging::LoggingPlatform;
pub use types::{ChannelId, GuildId, PlatformError, PlatformResult, RoleId, UserId};
