//! Nullable store: thread-safe in-memory subscription storage for testing.

use campaign_store::{StoreError, SubscriptionMap, SubscriptionStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// An in-memory subscription store.
///
/// `None` plays the role of "no backing file". Saves can be made to fail to
/// exercise persistence-failure handling.
pub struct NullStore {
    persisted: Mutex<Option<SubscriptionMap>>,
    failing: AtomicBool,
    saves: AtomicUsize,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            persisted: Mutex::new(None),
            failing: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }

    /// Start from an already-persisted mapping.
    pub fn with_contents(map: SubscriptionMap) -> Self {
        let store = Self::new();
        *store.persisted.lock().unwrap() = Some(map);
        store
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The persisted mapping, or `None` if nothing is stored.
    pub fn persisted(&self) -> Option<SubscriptionMap> {
        self.persisted.lock().unwrap().clone()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionStore for NullStore {
    fn load(&self) -> Result<SubscriptionMap, StoreError> {
        Ok(self.persisted.lock().unwrap().clone().unwrap_or_default())
    }

    fn save(&self, map: &SubscriptionMap) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("null store set to fail".into()));
        }
        *self.persisted.lock().unwrap() = if map.is_empty() {
            None
        } else {
            Some(map.clone())
        };
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
