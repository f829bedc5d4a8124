//! The per-account enrollment record.

use crate::{AccountId, ChainAddress, SocialHandle, Timestamp};
use serde::{Deserialize, Serialize};

/// Enrollment state of one chat account.
///
/// Serialized with camelCase field names; this is both the on-disk layout and
/// the body returned by the companion HTTP API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRecord {
    pub account_id: AccountId,
    /// The single live proof code. Overwritten on every challenge round.
    pub proof_code: String,
    /// Immutable after subscription.
    pub external_handle: SocialHandle,
    pub chain_address: ChainAddress,
    pub verified: bool,
    pub balance: u64,
    #[serde(default)]
    pub secondary_balance: u64,
    /// Last rewarded task; starts the cooldown window.
    #[serde(default)]
    pub last_task_at: Option<Timestamp>,
    /// Set while a task code is outstanding, cleared when it is rewarded.
    #[serde(default)]
    pub task_issued_at: Option<Timestamp>,
}

impl EnrollmentRecord {
    /// A freshly subscribed, unverified record.
    pub fn new(
        account_id: AccountId,
        external_handle: SocialHandle,
        chain_address: ChainAddress,
        proof_code: String,
    ) -> Self {
        Self {
            account_id,
            proof_code,
            external_handle,
            chain_address,
            verified: false,
            balance: 0,
            secondary_balance: 0,
            last_task_at: None,
            task_issued_at: None,
        }
    }

    /// Hand out a new task code.
    pub fn issue_task(&mut self, code: String, now: Timestamp) {
        self.proof_code = code;
        self.task_issued_at = Some(now);
    }

    pub fn has_open_task(&self) -> bool {
        self.task_issued_at.is_some()
    }

    /// Credit a completed task and close it. Balances never decrease.
    pub fn credit_task(&mut self, reward: u64, now: Timestamp) {
        self.balance = self.balance.saturating_add(reward);
        self.last_task_at = Some(now);
        self.task_issued_at = None;
    }
}
