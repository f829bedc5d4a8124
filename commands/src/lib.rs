//! Chat command surface for the proof-code campaign.
//!
//! Messages addressed to the bot are parsed into a [`Command`], dispatched
//! to the enrollment workflow, and answered with a plain-text reply.

pub mod frontend;
pub mod grammar;
pub mod platform;
pub mod replies;

pub use frontend::{ChatFrontend, IncomingMessage};
pub use grammar::{parse, strip_mention, Command, ParseError};
pub use platform::{Channel, ChatPlatform, PlatformError};
pub use replies::Replies;
