//! The chat platform boundary.

use crate::IncomingMessage;
use campaign_types::AccountId;
use thiserror::Error;

/// Where a message was posted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// A direct message with the bot.
    Direct,
    /// A channel of a guild (server).
    Guild { channel_id: String },
}

impl Channel {
    pub fn is_private(&self) -> bool {
        matches!(self, Channel::Direct)
    }
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to deliver message: {0}")]
    Delivery(String),

    #[error("chat platform unavailable: {0}")]
    Unavailable(String),

    #[error("not found: {0}")]
    NotFound(String),
}

/// Operations the bot needs from the chat platform.
///
/// The enrollment surface only sends replies; membership, roles and
/// presence are available to other surfaces.
#[async_trait::async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Reply to `message` in the channel it came from.
    async fn send_reply(&self, message: &IncomingMessage, text: &str) -> Result<(), PlatformError>;

    async fn is_guild_member(&self, account: &AccountId, guild_id: &str) -> Result<bool, PlatformError>;

    async fn assign_role(&self, account: &AccountId, role: &str) -> Result<(), PlatformError>;

    async fn set_presence(&self, status: &str) -> Result<(), PlatformError>;
}
