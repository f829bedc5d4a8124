//! External post lookup collaborator.
//!
//! The social platform is reached only through this trait, so the probe can
//! be exercised against scripted lookups in tests.

use crate::LookupError;
use serde::{Deserialize, Serialize};

/// A resolved account on the social platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalUser {
    /// Platform-internal id used by the timeline endpoint.
    pub id: String,
    pub username: String,
}

/// One public post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
}

#[async_trait::async_trait]
pub trait PostLookup: Send + Sync {
    /// Resolve a handle to an account. `Ok(None)` if no such account exists.
    async fn resolve_user(&self, handle: &str) -> Result<Option<ExternalUser>, LookupError>;

    /// The account's most recent public posts, newest first, at most
    /// `max_results` of them.
    async fn recent_posts(
        &self,
        user: &ExternalUser,
        max_results: u32,
    ) -> Result<Vec<Post>, LookupError>;
}
