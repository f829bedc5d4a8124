//! Local chat console: drives the chat surface from stdin.

use async_trait::async_trait;
use campaign_commands::{Channel, ChatFrontend, ChatPlatform, IncomingMessage, PlatformError};
use campaign_types::AccountId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::info;

/// Mention prepended to console lines that do not start with one.
const CONSOLE_MENTION: &str = "<@0>";

/// Chat platform that prints replies to a writer.
pub struct ConsolePlatform<W> {
    out: Mutex<W>,
}

impl<W> ConsolePlatform<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> ChatPlatform for ConsolePlatform<W> {
    async fn send_reply(&self, _message: &IncomingMessage, text: &str) -> Result<(), PlatformError> {
        let mut out = self.out.lock().await;
        out.write_all(format!("{text}\n").as_bytes())
            .await
            .map_err(|e| PlatformError::Delivery(e.to_string()))?;
        out.flush()
            .await
            .map_err(|e| PlatformError::Delivery(e.to_string()))
    }

    async fn is_guild_member(&self, _account: &AccountId, _guild_id: &str) -> Result<bool, PlatformError> {
        Ok(true)
    }

    async fn assign_role(&self, account: &AccountId, role: &str) -> Result<(), PlatformError> {
        info!(account = %account, role, "role assigned");
        Ok(())
    }

    async fn set_presence(&self, status: &str) -> Result<(), PlatformError> {
        info!(status, "presence set");
        Ok(())
    }
}

/// Feed every input line to the chat front end as a message from `author`.
///
/// Lines without a leading mention get one, so `task` works as well as
/// `<@0> task`. Returns the number of replies sent.
pub async fn run_console<R, P>(
    frontend: &ChatFrontend,
    platform: &P,
    input: R,
    author: AccountId,
    channel: Channel,
) -> Result<usize, PlatformError>
where
    R: AsyncBufRead + Unpin,
    P: ChatPlatform,
{
    platform.set_presence("online").await?;
    let mut lines = input.lines();
    let mut replies = 0;
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| PlatformError::Unavailable(e.to_string()))?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let content = if line.starts_with("<@") {
            line.to_string()
        } else {
            format!("{CONSOLE_MENTION} {line}")
        };
        let message = IncomingMessage {
            author: author.clone(),
            author_is_bot: false,
            channel: channel.clone(),
            content,
        };
        if frontend.respond(platform, &message).await? {
            replies += 1;
        }
    }
    Ok(replies)
}
