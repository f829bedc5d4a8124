//! Chain address validation.
//!
//! Address format: `0x` + 40 hex chars (20 bytes).
//!
//! All-lowercase and all-uppercase hex bodies are accepted as-is. Mixed-case
//! bodies must carry a valid EIP-55 checksum: the i-th hex letter is uppercase
//! iff the i-th nibble of Keccak-256(lowercase body) is >= 8.

use sha3::{Digest, Keccak256};

/// Prefix for all accepted addresses.
const PREFIX: &str = "0x";
/// Hex characters after the prefix.
const BODY_LEN: usize = 40;

/// Address-format collaborator consulted at subscribe time.
pub trait AddressValidator: Send + Sync {
    fn is_valid(&self, address: &str) -> bool;
}

/// Validator for EVM-style addresses with EIP-55 checksums.
#[derive(Clone, Copy, Debug, Default)]
pub struct Eip55Validator;

impl AddressValidator for Eip55Validator {
    fn is_valid(&self, address: &str) -> bool {
        is_valid_address(address)
    }
}

/// Validate an address string.
pub fn is_valid_address(address: &str) -> bool {
    let Some(body) = address.strip_prefix(PREFIX) else {
        return false;
    };
    if body.len() != BODY_LEN || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }

    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }

    checksum_address(body).as_deref() == Some(address)
}

/// Render the EIP-55 checksummed form (`0x`-prefixed) of a 40-char hex body.
/// Returns `None` if the body is not 40 hex chars.
pub fn checksum_address(body: &str) -> Option<String> {
    let body = body.strip_prefix(PREFIX).unwrap_or(body);
    if body.len() != BODY_LEN || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let lower = body.to_ascii_lowercase();
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(PREFIX.len() + BODY_LEN);
    out.push_str(PREFIX);
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0F };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    Some(out)
}
