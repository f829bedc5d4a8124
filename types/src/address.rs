//! Chain address bound to an enrollment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A blockchain account address as the user supplied it.
///
/// The original casing is kept for display; every comparison goes through
/// [`ChainAddress::matches`], which is case-insensitive. Format validation is
/// the job of an address validator, not of this type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainAddress(String);

impl ChainAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against another address string.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChainAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ignores_case() {
        let addr = ChainAddress::new("0xABCdef0000000000000000000000000000000123");
        assert!(addr.matches("0xabcdef0000000000000000000000000000000123"));
        assert!(addr.matches("0XABCDEF0000000000000000000000000000000123"));
        assert!(!addr.matches("0xabcdef0000000000000000000000000000000124"));
    }

    #[test]
    fn display_keeps_original_casing() {
        let addr = ChainAddress::new("0xAbC");
        assert_eq!(addr.to_string(), "0xAbC");
        assert!(addr.matches("0xABC"));
    }
}
