//! Campaign parameters: the single source of truth for every tunable
//! constant the enrollment workflow consults.

use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// 2024-12-07T00:00:00Z.
pub const DEFAULT_CAMPAIGN_START_SECS: u64 = 1_733_529_600;

/// One task per day.
pub const DEFAULT_TASK_COOLDOWN_SECS: u64 = 86_400;

/// Points credited per verified task.
pub const DEFAULT_TASK_REWARD: u64 = 1_000;

/// Minimum spacing between external lookups.
pub const DEFAULT_PROBE_INTERVAL_SECS: u64 = 10;

/// Number of recent posts scanned for a code.
pub const DEFAULT_PROBE_MAX_POSTS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignParams {
    /// Instant (UTC) from which enrollment and task commands are accepted.
    pub campaign_start: Timestamp,

    /// Minimum seconds between two rewarded tasks of the same account.
    pub task_cooldown_secs: u64,

    /// Points added to `balance` by each successful task verification.
    pub task_reward: u64,

    /// Minimum seconds between two calls to the external lookup.
    pub probe_interval_secs: u64,

    /// How many of the most recent posts the probe inspects.
    pub probe_max_posts: u32,
}

impl Default for CampaignParams {
    fn default() -> Self {
        Self {
            campaign_start: Timestamp::new(DEFAULT_CAMPAIGN_START_SECS),
            task_cooldown_secs: DEFAULT_TASK_COOLDOWN_SECS,
            task_reward: DEFAULT_TASK_REWARD,
            probe_interval_secs: DEFAULT_PROBE_INTERVAL_SECS,
            probe_max_posts: DEFAULT_PROBE_MAX_POSTS,
        }
    }
}

impl CampaignParams {
    /// Parameters with the campaign already open and no probe throttle,
    /// for tests and local runs.
    pub fn open_now() -> Self {
        Self {
            campaign_start: Timestamp::EPOCH,
            probe_interval_secs: 0,
            ..Self::default()
        }
    }
}
