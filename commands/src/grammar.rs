//! Chat command grammar.
//!
//! A message is `<@BOT_ID> verb [sub-verb | args...]`. Verbs are matched
//! case-insensitively; arguments keep their case and are passed on as typed.

use campaign_enrollment::Intent;
use thiserror::Error;

/// A parsed chat command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Balance,
    Subscribe { handle: String, address: String },
    Finalize,
    Task,
    VerifyTask,
    Countdown,
}

impl Command {
    /// The workflow intent behind this command, if it has one.
    pub fn intent(&self) -> Option<Intent> {
        match self {
            Command::Help | Command::Countdown => None,
            Command::Balance => Some(Intent::Balance),
            Command::Subscribe { handle, address } => Some(Intent::Subscribe {
                handle: handle.clone(),
                address: address.clone(),
            }),
            Command::Finalize => Some(Intent::Finalize),
            Command::Task => Some(Intent::Task),
            Command::VerifyTask => Some(Intent::VerifyTask),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no command detected")]
    Empty,

    #[error("unknown command \"{0}\"")]
    Unknown(String),

    /// `verify` followed by anything but `task`.
    #[error("unknown command \"verify {0}\"")]
    UnknownVerify(String),

    #[error("usage: subscribe @handle 0xaddress")]
    SubscribeUsage,
}

/// Strip a leading user mention (`<@123>` or `<@!123>`) and return the rest.
///
/// Returns `None` when the message does not start with a mention.
pub fn strip_mention(content: &str) -> Option<&str> {
    let rest = content.trim_start().strip_prefix("<@")?;
    let rest = rest.strip_prefix('!').unwrap_or(rest);
    let end = rest.find('>')?;
    let id = &rest[..end];
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(rest[end + 1..].trim())
}

/// Parse the text that follows the mention.
pub fn parse(text: &str) -> Result<Command, ParseError> {
    let mut words = text.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(ParseError::Empty);
    };

    match verb.to_ascii_lowercase().as_str() {
        "help" => Ok(Command::Help),
        "balance" => Ok(Command::Balance),
        "finalize" => Ok(Command::Finalize),
        "task" => Ok(Command::Task),
        "countdown" => Ok(Command::Countdown),
        "verify" => match words.next() {
            Some(sub) if sub.eq_ignore_ascii_case("task") => Ok(Command::VerifyTask),
            other => Err(ParseError::UnknownVerify(other.unwrap_or_default().to_string())),
        },
        "subscribe" => {
            let (Some(handle), Some(address)) = (words.next(), words.next()) else {
                return Err(ParseError::SubscribeUsage);
            };
            Ok(Command::Subscribe {
                handle: handle.to_string(),
                address: address.to_string(),
            })
        }
        _ => Err(ParseError::Unknown(verb.to_ascii_lowercase())),
    }
}
