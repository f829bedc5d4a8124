//! Proof-code generation.
//!
//! Codes are scoped per account and never checked for global uniqueness; 32
//! bits of OS randomness keep accidental collisions between concurrently
//! issued codes negligible for a campaign-sized population.

use thiserror::Error;

/// Number of random bytes per code (rendered as twice as many hex chars).
pub const CODE_BYTES: usize = 4;

#[derive(Debug, Error)]
pub enum CodeError {
    #[error("OS random source unavailable: {0}")]
    Entropy(String),
}

/// Produces fresh proof codes.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> Result<String, CodeError>;
}

/// Code generator backed by the operating system CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsCodeGenerator;

impl CodeGenerator for OsCodeGenerator {
    fn generate(&self) -> Result<String, CodeError> {
        generate_code()
    }
}

/// Generate an 8-character lowercase hex code from the OS random source.
pub fn generate_code() -> Result<String, CodeError> {
    let mut bytes = [0u8; CODE_BYTES];
    getrandom::getrandom(&mut bytes).map_err(|e| CodeError::Entropy(e.to_string()))?;
    Ok(hex::encode(bytes))
}
