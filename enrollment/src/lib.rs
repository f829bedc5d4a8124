//! Enrollment workflow for the proof-code campaign.
//!
//! Per account, an enrollment moves `unregistered -> pending verification ->
//! verified` through `subscribe` and `finalize`. Once verified, a recurring
//! cycle `idle -> task issued -> rewarded` runs through `task` and
//! `verify task`, at most once per cooldown window.
//!
//! Every command enters through [`EnrollmentWorkflow::execute`] with an
//! [`Invocation`] (who is asking, from which context) and an [`Intent`]
//! (what they ask for). Successful commands yield an [`Outcome`]; refusals
//! yield a [`Rejection`]. Mutations are persisted before they are
//! acknowledged.

pub mod eligibility;
pub mod intent;
pub mod ledger;
pub mod outcome;
pub mod workflow;

pub use eligibility::EligibilityClock;
pub use intent::{Intent, Invocation, Subject};
pub use ledger::Ledger;
pub use outcome::{Outcome, Rejection, RejectionKind};
pub use workflow::{Collaborators, EnrollmentWorkflow};
