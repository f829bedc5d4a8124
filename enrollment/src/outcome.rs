//! Results of a workflow command.

use campaign_types::{Timestamp, ValidationError};
use thiserror::Error;

/// A command that succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A record was created; `code` must be posted, then `finalize` run.
    Subscribed { code: String },
    /// The initial proof was found; the record is now verified.
    Verified,
    /// A task code was issued; `code` must be posted, then `verify task` run.
    TaskIssued { code: String },
    /// The task proof was found and the reward credited.
    TaskRewarded { reward: u64, balance: u64 },
    Balance { balance: u64, secondary_balance: u64 },
}

/// Broad class of a [`Rejection`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectionKind {
    /// Campaign closed, wrong context, already registered, cooldown active...
    Precondition,
    /// Malformed handle or address, missing argument.
    Validation,
    /// The address is bound to another account.
    Conflict,
    /// The probe did not confirm the code, for whatever reason.
    ProbeFailure,
    /// The store could not be written; nothing changed.
    Persistence,
    /// Code generation failed.
    Internal,
}

/// A refused command. No state changed.
///
/// `Display` is the message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the campaign has not started yet")]
    CampaignClosed { opens_at: Timestamp },

    #[error("this command only works in a direct message")]
    PrivateContextRequired,

    #[error("you are already registered")]
    AlreadyRegistered,

    #[error("you are not subscribed yet")]
    NotSubscribed,

    #[error("no subscription found for address {0}")]
    UnknownAddress(String),

    #[error("your account is already verified")]
    AlreadyVerified,

    #[error("your account is not verified yet; run finalize first")]
    NotVerified,

    #[error("you can only complete one task per day; try again in {remaining_secs} seconds")]
    CooldownActive { remaining_secs: u64 },

    #[error("no task in progress; request one with task first")]
    NoTaskIssued,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("this address is already registered to another account")]
    AddressTaken,

    #[error("verification failed: the code was not found in your recent posts")]
    VerificationFailed,

    #[error("could not save your data, please try again later")]
    Persistence(String),

    #[error("could not generate a code, please try again later")]
    CodeGeneration(String),
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::CampaignClosed { .. }
            | Rejection::PrivateContextRequired
            | Rejection::AlreadyRegistered
            | Rejection::NotSubscribed
            | Rejection::UnknownAddress(_)
            | Rejection::AlreadyVerified
            | Rejection::NotVerified
            | Rejection::CooldownActive { .. }
            | Rejection::NoTaskIssued => RejectionKind::Precondition,
            Rejection::Invalid(_) => RejectionKind::Validation,
            Rejection::AddressTaken => RejectionKind::Conflict,
            Rejection::VerificationFailed => RejectionKind::ProbeFailure,
            Rejection::Persistence(_) => RejectionKind::Persistence,
            Rejection::CodeGeneration(_) => RejectionKind::Internal,
        }
    }
}
