//! Fundamental types for the proof-code campaign.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identities, social handles, chain addresses, timestamps, campaign
//! parameters, and the per-account enrollment record.

pub mod account;
pub mod address;
pub mod error;
pub mod handle;
pub mod params;
pub mod record;
pub mod time;

pub use account::AccountId;
pub use address::ChainAddress;
pub use error::ValidationError;
pub use handle::SocialHandle;
pub use params::CampaignParams;
pub use record::EnrollmentRecord;
pub use time::{Clock, SystemClock, Timestamp};
