//! Cryptographic primitives for the proof-code campaign.
//!
//! - **Proof codes**: 4 bytes from the OS CSPRNG rendered as 8 lowercase hex chars
//! - **Address validation**: `0x`-prefixed 20-byte hex addresses, with the EIP-55
//!   Keccak-256 checksum enforced on mixed-case input

pub mod address;
pub mod code;

pub use address::{checksum_address, is_valid_address, AddressValidator, Eip55Validator};
pub use code::{generate_code, CodeError, CodeGenerator, OsCodeGenerator, CODE_BYTES};
