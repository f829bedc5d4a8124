//! Chat message dispatch.

use crate::{parse, strip_mention, Channel, ChatPlatform, Command, PlatformError, Replies};
use campaign_enrollment::{EnrollmentWorkflow, Invocation, Subject};
use campaign_types::AccountId;
use std::sync::Arc;
use tracing::{debug, info};

/// A message as received from the chat platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingMessage {
    pub author: AccountId,
    pub author_is_bot: bool,
    pub channel: Channel,
    pub content: String,
}

impl IncomingMessage {
    pub fn direct(author: impl Into<AccountId>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            author_is_bot: false,
            channel: Channel::Direct,
            content: content.into(),
        }
    }

    pub fn in_channel(
        author: impl Into<AccountId>,
        channel_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            author_is_bot: false,
            channel: Channel::Guild {
                channel_id: channel_id.into(),
            },
            content: content.into(),
        }
    }
}

pub struct ChatFrontend {
    workflow: Arc<EnrollmentWorkflow>,
    replies: Replies,
    /// When set, guild messages outside this channel are ignored.
    allowed_channel: Option<String>,
}

impl ChatFrontend {
    pub fn new(
        workflow: Arc<EnrollmentWorkflow>,
        replies: Replies,
        allowed_channel: Option<String>,
    ) -> Self {
        Self {
            workflow,
            replies,
            allowed_channel,
        }
    }

    /// The workflow this front end drives; other surfaces in the same
    /// process share it.
    pub fn workflow(&self) -> &Arc<EnrollmentWorkflow> {
        &self.workflow
    }

    fn accepts(&self, message: &IncomingMessage) -> bool {
        if message.author_is_bot {
            return false;
        }
        match (&message.channel, &self.allowed_channel) {
            (Channel::Guild { channel_id }, Some(allowed)) => channel_id == allowed,
            _ => true,
        }
    }

    /// The reply to `message`, or `None` if the bot should stay silent.
    pub async fn handle(&self, message: &IncomingMessage) -> Option<String> {
        if !self.accepts(message) {
            return None;
        }
        let text = strip_mention(&message.content)?;
        debug!(author = %message.author, command = text, "chat command received");

        let command = match parse(text) {
            Ok(command) => command,
            Err(e) => return Some(self.replies.parse_error(&e)),
        };

        let reply = match command {
            Command::Help => self.replies.help(),
            Command::Countdown => {
                let eligibility = self.workflow.eligibility();
                self.replies.countdown(
                    eligibility.campaign_start(),
                    eligibility.until_open(self.workflow.now()),
                )
            }
            other => {
                let intent = other.intent()?;
                let name = intent.name();
                let invocation = Invocation {
                    subject: Subject::Account(message.author.clone()),
                    private_context: message.channel.is_private(),
                };
                match self.workflow.execute(&invocation, intent).await {
                    Ok(outcome) => self.replies.outcome(&outcome),
                    Err(rejection) => self.replies.rejection(name, &rejection),
                }
            }
        };
        Some(reply)
    }

    /// Handle `message` and send the reply, if any, through `platform`.
    ///
    /// Returns whether a reply was sent.
    pub async fn respond(
        &self,
        platform: &dyn ChatPlatform,
        message: &IncomingMessage,
    ) -> Result<bool, PlatformError> {
        let Some(reply) = self.handle(message).await else {
            return Ok(false);
        };
        platform.send_reply(message, &reply).await?;
        info!(author = %message.author, "reply sent");
        Ok(true)
    }
}
