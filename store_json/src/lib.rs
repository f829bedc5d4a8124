//! JSON-file storage backend for campaign subscriptions.
//!
//! Implements [`campaign_store::SubscriptionStore`] over a single JSON
//! document mapping account ids to enrollment records. The document is
//! rewritten wholesale on every save; an empty mapping deletes the file.

pub mod error;
pub mod file;

pub use error::JsonStoreError;
pub use file::{JsonFileStore, DEFAULT_FILE_NAME};
