//! Input validation errors shared across crates.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid social handle: {0}")]
    InvalidHandle(String),

    #[error("invalid chain address: {0}")]
    InvalidAddress(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
}
