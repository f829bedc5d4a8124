//! Social platform client.
//!
//! Implements [`campaign_verification::PostLookup`] over the platform's v2
//! REST API:
//! - `GET /2/users/by/username/{handle}` resolves a handle to a user id
//! - `GET /2/users/{id}/tweets?max_results=N` returns the latest posts
//!
//! Requests authenticate with an app bearer token and are bounded by the
//! client's own timeouts; the probe never retries.

pub mod client;
pub mod types;

pub use client::{XApiClient, DEFAULT_API_BASE_URL};
