use thiserror::Error;

/// Failures of the external post lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    RequestFailed(String),

    #[error("lookup endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("invalid response from lookup endpoint: {0}")]
    InvalidResponse(String),

    #[error("lookup rate limited by remote")]
    RateLimited,
}
