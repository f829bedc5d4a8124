//! Nullable infrastructure for deterministic testing.
//!
//! The enrollment workflow reaches the outside world only through traits:
//! [`campaign_types::Clock`], [`campaign_store::SubscriptionStore`],
//! [`campaign_verification::PostLookup`] and
//! [`campaign_crypto::CodeGenerator`]. The doubles here stand in for the
//! wall clock, the JSON file, the social platform and the OS random source.
//! Each one is scriptable from a test and never touches disk or network.

pub mod clock;
pub mod codes;
pub mod lookup;
pub mod store;

pub use clock::NullClock;
pub use codes::SequenceCodes;
pub use lookup::NullLookup;
pub use store::NullStore;
