//! The verification probe.

use crate::{PostLookup, ProbeThrottle};
use campaign_types::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Why a probe did or did not confirm a code.
///
/// Only [`ProbeOutcome::Found`] counts as verified. The other variants exist
/// for logging; callers surface all of them identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A recent post contains the code.
    Found,
    /// The account exists but none of its recent posts contain the code.
    NotPosted,
    /// The handle does not resolve to an account.
    UnknownAccount,
    /// Refused locally by the throttle; no external call was made.
    Throttled,
    /// The lookup failed (transport, remote error, bad payload).
    LookupFailed,
}

impl ProbeOutcome {
    pub fn is_verified(self) -> bool {
        matches!(self, ProbeOutcome::Found)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProbeOutcome::Found => "found",
            ProbeOutcome::NotPosted => "not_posted",
            ProbeOutcome::UnknownAccount => "unknown_account",
            ProbeOutcome::Throttled => "throttled",
            ProbeOutcome::LookupFailed => "lookup_failed",
        }
    }
}

/// Throttled "did `handle` publish `code`" check.
pub struct VerificationProbe {
    lookup: Arc<dyn PostLookup>,
    throttle: ProbeThrottle,
    max_posts: u32,
}

impl VerificationProbe {
    pub fn new(
        lookup: Arc<dyn PostLookup>,
        clock: Arc<dyn Clock>,
        interval_secs: u64,
        max_posts: u32,
    ) -> Self {
        Self {
            lookup,
            throttle: ProbeThrottle::new(interval_secs, clock),
            max_posts,
        }
    }

    /// `true` iff one of the account's most recent posts contains `code` as
    /// an exact, case-sensitive substring.
    pub async fn check_posted(&self, handle: &str, code: &str) -> bool {
        self.probe(handle, code).await.is_verified()
    }

    /// Run the check and report why it succeeded or failed.
    ///
    /// Never returns an error: lookup failures are logged and reported as
    /// [`ProbeOutcome::LookupFailed`].
    pub async fn probe(&self, handle: &str, code: &str) -> ProbeOutcome {
        // An empty needle would match any post.
        if code.is_empty() {
            return ProbeOutcome::NotPosted;
        }
        if !self.throttle.try_acquire() {
            debug!(handle, "probe throttled");
            return ProbeOutcome::Throttled;
        }

        let user = match self.lookup.resolve_user(handle).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!(handle, "social account not found");
                return ProbeOutcome::UnknownAccount;
            }
            Err(e) => {
                warn!(handle, error = %e, "resolving social account failed");
                return ProbeOutcome::LookupFailed;
            }
        };

        let posts = match self.lookup.recent_posts(&user, self.max_posts).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!(handle, error = %e, "fetching recent posts failed");
                return ProbeOutcome::LookupFailed;
            }
        };

        debug!(handle, posts = posts.len(), "fetched recent posts");
        if posts
            .iter()
            .take(self.max_posts as usize)
            .any(|p| p.text.contains(code))
        {
            ProbeOutcome::Found
        } else {
            ProbeOutcome::NotPosted
        }
    }

    pub fn throttle(&self) -> &ProbeThrottle {
        &self.throttle
    }
}
