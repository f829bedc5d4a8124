//! Nullable post lookup: scripted social accounts and posts.

use campaign_verification::{ExternalUser, LookupError, Post, PostLookup};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// An in-memory social platform.
///
/// Accounts and posts are added programmatically; `fail_next` makes lookups
/// error out to exercise failure paths.
pub struct NullLookup {
    /// handle -> (user, posts newest first)
    accounts: Mutex<HashMap<String, (ExternalUser, Vec<Post>)>>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl NullLookup {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Register an account with no posts.
    pub fn add_account(&self, handle: &str) {
        let mut accounts = self.accounts.lock().unwrap();
        let n = accounts.len();
        accounts.entry(handle.to_string()).or_insert_with(|| {
            (
                ExternalUser {
                    id: format!("u{n}"),
                    username: handle.to_string(),
                },
                Vec::new(),
            )
        });
    }

    /// Publish a post on `handle`'s timeline (registering the account if
    /// needed). The newest post comes first.
    pub fn publish(&self, handle: &str, text: &str) {
        self.add_account(handle);
        let mut accounts = self.accounts.lock().unwrap();
        if let Some((_, posts)) = accounts.get_mut(handle) {
            let id = format!("p{}", posts.len());
            posts.insert(
                0,
                Post {
                    id,
                    text: text.to_string(),
                },
            );
        }
    }

    /// Make every lookup fail until reset with `set_failing(false)`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of lookup calls (resolve + timeline) received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for NullLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PostLookup for NullLookup {
    async fn resolve_user(&self, handle: &str) -> Result<Option<ExternalUser>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(LookupError::Unreachable("null lookup set to fail".into()));
        }
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(handle)
            .map(|(user, _)| user.clone()))
    }

    async fn recent_posts(
        &self,
        user: &ExternalUser,
        max_results: u32,
    ) -> Result<Vec<Post>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(LookupError::Unreachable("null lookup set to fail".into()));
        }
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(&user.username)
            .map(|(_, posts)| posts.iter().take(max_results as usize).cloned().collect())
            .unwrap_or_default())
    }
}
