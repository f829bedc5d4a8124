//! In-memory subscription mapping with write-through persistence.
//!
//! The cached mapping is the source of truth between saves; the store is
//! never re-read after [`Ledger::open`]. Every mutation runs inside one
//! critical section: check, mutate, save. The cached copy only changes once
//! the save succeeded.
//!
//! Only one process may own a backing file. Two processes caching the same
//! file would overwrite each other's changes; surfaces that run together
//! share one ledger through one workflow.

use crate::Rejection;
use campaign_store::{find_by_address, StoreError, SubscriptionMap, SubscriptionStore};
use campaign_types::{AccountId, EnrollmentRecord};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, error};

pub struct Ledger {
    store: Arc<dyn SubscriptionStore>,
    cache: Mutex<SubscriptionMap>,
    /// One lock per account, held for a whole command including probe awaits.
    account_locks: std::sync::Mutex<HashMap<AccountId, Arc<Mutex<()>>>>,
}

impl Ledger {
    /// Load the persisted mapping and take ownership of it.
    pub fn open(store: Arc<dyn SubscriptionStore>) -> Result<Self, StoreError> {
        let map = store.load()?;
        debug!(records = map.len(), "subscription ledger loaded");
        Ok(Self {
            store,
            cache: Mutex::new(map),
            account_locks: std::sync::Mutex::new(HashMap::new()),
        })
    }

    /// Serialize commands of one account. The guard may be held across
    /// awaits; other accounts are not blocked.
    ///
    /// Locks nobody holds or waits for are dropped on the way in, so the
    /// table only tracks accounts with a command in flight.
    pub async fn lock_account(&self, account: &AccountId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .account_locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(account.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    fn tracked_accounts(&self) -> usize {
        self.account_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub async fn snapshot(&self, account: &AccountId) -> Option<EnrollmentRecord> {
        self.cache.lock().await.get(account).cloned()
    }

    /// Account bound to `address`, compared case-insensitively.
    pub async fn resolve_address(&self, address: &str) -> Option<AccountId> {
        let cache = self.cache.lock().await;
        find_by_address(&cache, address).map(|r| r.account_id.clone())
    }

    pub async fn find_by_address(&self, address: &str) -> Option<EnrollmentRecord> {
        let cache = self.cache.lock().await;
        find_by_address(&cache, address).cloned()
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.lock().await.is_empty()
    }

    /// Atomically check and replace the record of `account`.
    ///
    /// `apply` sees the whole mapping and the current record, and returns
    /// the new record plus a value for the caller. Nothing is stored if it
    /// rejects. If the save fails, the previous record is restored and a
    /// [`Rejection::Persistence`] is returned.
    pub async fn update<T, F>(&self, account: &AccountId, apply: F) -> Result<T, Rejection>
    where
        F: FnOnce(&SubscriptionMap, Option<&EnrollmentRecord>) -> Result<(EnrollmentRecord, T), Rejection>,
    {
        let mut cache = self.cache.lock().await;
        let (record, value) = apply(&cache, cache.get(account))?;

        let previous = cache.insert(account.clone(), record);
        if let Err(e) = self.store.save(&cache) {
            match previous {
                Some(previous) => {
                    cache.insert(account.clone(), previous);
                }
                None => {
                    cache.remove(account);
                }
            }
            error!(account = %account, error = %e, "failed to persist subscriptions");
            return Err(Rejection::Persistence(e.to_string()));
        }
        Ok(value)
    }
}
