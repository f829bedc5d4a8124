//! Proof-code verification.
//!
//! A [`VerificationProbe`] answers one question: did this social account
//! recently publish a post containing this exact code? The lookup itself is a
//! pluggable [`PostLookup`] collaborator; the probe adds a process-wide
//! [`ProbeThrottle`] in front of it and collapses every failure to "not
//! verified".

pub mod error;
pub mod lookup;
pub mod probe;
pub mod throttle;

pub use error::LookupError;
pub use lookup::{ExternalUser, Post, PostLookup};
pub use probe::{ProbeOutcome, VerificationProbe};
pub use throttle::ProbeThrottle;
