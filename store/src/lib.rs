//! Abstract subscription storage for the proof-code campaign.
//!
//! The whole mapping `account id -> enrollment record` is loaded and saved as
//! one unit. Backends (the JSON file, the in-memory store for tests) implement
//! [`SubscriptionStore`]; the rest of the codebase depends only on the trait.

pub mod error;

pub use error::StoreError;

use campaign_types::{AccountId, EnrollmentRecord};
use std::collections::BTreeMap;

/// The authoritative account -> record mapping. Ordered so that persisted
/// output is stable across saves.
pub type SubscriptionMap = BTreeMap<AccountId, EnrollmentRecord>;

/// Durable whole-mapping storage.
///
/// `save` replaces the prior content entirely. Saving an empty mapping must
/// leave the backend in the same state as a first run, so that `load`
/// returns an empty mapping again.
pub trait SubscriptionStore: Send + Sync {
    /// Read the persisted mapping; empty if nothing has been stored yet.
    fn load(&self) -> Result<SubscriptionMap, StoreError>;

    /// Persist the full mapping, replacing prior content.
    fn save(&self, map: &SubscriptionMap) -> Result<(), StoreError>;
}

/// Case-insensitive linear scan for the record bound to `address`.
pub fn find_by_address<'a>(
    map: &'a SubscriptionMap,
    address: &str,
) -> Option<&'a EnrollmentRecord> {
    map.values().find(|r| r.chain_address.matches(address))
}
