//! Social-media account handle.

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum handle length accepted by the social platform.
pub const MAX_HANDLE_LEN: usize = 15;

/// A validated social-media handle, without the leading `@`.
///
/// Bound at subscribe time and never updated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocialHandle(String);

impl SocialHandle {
    /// Parse a handle as typed by a user. A single leading `@` is stripped;
    /// the rest must be 1-15 ASCII letters, digits or underscores.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let name = raw.strip_prefix('@').unwrap_or(raw);
        if is_valid_handle(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(ValidationError::InvalidHandle(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `^[A-Za-z0-9_]{1,15}$`
pub fn is_valid_handle(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_HANDLE_LEN
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

impl fmt::Display for SocialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
