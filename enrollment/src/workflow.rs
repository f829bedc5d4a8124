//! The enrollment state machine.

use crate::{EligibilityClock, Intent, Invocation, Ledger, Outcome, Rejection, Subject};
use campaign_crypto::{AddressValidator, CodeGenerator};
use campaign_store::{find_by_address, StoreError, SubscriptionStore};
use campaign_types::{
    AccountId, CampaignParams, ChainAddress, Clock, EnrollmentRecord, SocialHandle,
    Timestamp, ValidationError,
};
use campaign_verification::{PostLookup, VerificationProbe};
use std::sync::Arc;
use tracing::{info, warn};

/// External services the workflow depends on.
pub struct Collaborators {
    pub store: Arc<dyn SubscriptionStore>,
    pub codes: Arc<dyn CodeGenerator>,
    pub addresses: Arc<dyn AddressValidator>,
    pub lookup: Arc<dyn PostLookup>,
    pub clock: Arc<dyn Clock>,
}

pub struct EnrollmentWorkflow {
    params: CampaignParams,
    eligibility: EligibilityClock,
    ledger: Ledger,
    codes: Arc<dyn CodeGenerator>,
    addresses: Arc<dyn AddressValidator>,
    probe: VerificationProbe,
    clock: Arc<dyn Clock>,
}

impl EnrollmentWorkflow {
    /// Build the workflow and load the persisted subscriptions.
    pub fn new(params: CampaignParams, collaborators: Collaborators) -> Result<Self, StoreError> {
        let Collaborators {
            store,
            codes,
            addresses,
            lookup,
            clock,
        } = collaborators;
        let probe = VerificationProbe::new(
            lookup,
            clock.clone(),
            params.probe_interval_secs,
            params.probe_max_posts,
        );
        Ok(Self {
            eligibility: EligibilityClock::from_params(&params),
            ledger: Ledger::open(store)?,
            params,
            codes,
            addresses,
            probe,
            clock,
        })
    }

    pub fn params(&self) -> &CampaignParams {
        &self.params
    }

    pub fn eligibility(&self) -> &EligibilityClock {
        &self.eligibility
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Run one command.
    pub async fn execute(
        &self,
        invocation: &Invocation,
        intent: Intent,
    ) -> Result<Outcome, Rejection> {
        let command = intent.name();
        let result = self.dispatch(invocation, intent).await;
        if let Err(rejection) = &result {
            warn!(subject = ?invocation.subject, command, reason = %rejection, "command rejected");
        }
        result
    }

    async fn dispatch(&self, invocation: &Invocation, intent: Intent) -> Result<Outcome, Rejection> {
        self.check_context(invocation, &intent)?;

        let account = self.resolve(&invocation.subject).await?;
        let _guard = self.ledger.lock_account(&account).await;
        match intent {
            Intent::Subscribe { handle, address } => self.subscribe(&account, &handle, &address).await,
            Intent::Finalize => self.finalize(&account).await,
            Intent::Task => self.task(&account).await,
            Intent::VerifyTask => self.verify_task(&account).await,
            Intent::Balance => self.balance(&account).await,
        }
    }

    /// Campaign gate first, then the private-context rule.
    fn check_context(&self, invocation: &Invocation, intent: &Intent) -> Result<(), Rejection> {
        let now = self.clock.now();
        if intent.requires_open_campaign() && !self.eligibility.is_campaign_open(now) {
            return Err(Rejection::CampaignClosed {
                opens_at: self.eligibility.campaign_start(),
            });
        }
        if intent.requires_private() && !invocation.private_context {
            return Err(Rejection::PrivateContextRequired);
        }
        Ok(())
    }

    async fn resolve(&self, subject: &Subject) -> Result<AccountId, Rejection> {
        match subject {
            Subject::Account(id) => Ok(id.clone()),
            Subject::Address(address) => self
                .ledger
                .resolve_address(address)
                .await
                .ok_or_else(|| Rejection::UnknownAddress(address.clone())),
        }
    }

    fn new_code(&self) -> Result<String, Rejection> {
        self.codes
            .generate()
            .map_err(|e| Rejection::CodeGeneration(e.to_string()))
    }

    async fn subscribe(
        &self,
        account: &AccountId,
        handle: &str,
        address: &str,
    ) -> Result<Outcome, Rejection> {
        let code = self.new_code()?;
        let addresses = &self.addresses;
        let issued = self
            .ledger
            .update(account, |map, current| {
                if current.is_some() {
                    return Err(Rejection::AlreadyRegistered);
                }
                let handle = SocialHandle::parse(handle)?;
                if address.is_empty() {
                    return Err(ValidationError::MissingArgument("address").into());
                }
                if !addresses.is_valid(address) {
                    return Err(ValidationError::InvalidAddress(address.to_string()).into());
                }
                if find_by_address(map, address).is_some() {
                    return Err(Rejection::AddressTaken);
                }
                let record = EnrollmentRecord::new(
                    account.clone(),
                    handle,
                    ChainAddress::new(address),
                    code.clone(),
                );
                Ok((record, code))
            })
            .await?;

        info!(account = %account, "subscribed, awaiting proof");
        Ok(Outcome::Subscribed { code: issued })
    }

    async fn finalize(&self, account: &AccountId) -> Result<Outcome, Rejection> {
        let record = self
            .ledger
            .snapshot(account)
            .await
            .ok_or(Rejection::NotSubscribed)?;
        if record.verified {
            return Err(Rejection::AlreadyVerified);
        }

        let outcome = self
            .probe
            .probe(record.external_handle.as_str(), &record.proof_code)
            .await;
        if !outcome.is_verified() {
            info!(account = %account, outcome = outcome.as_str(), "initial proof not confirmed");
            return Err(Rejection::VerificationFailed);
        }

        self.ledger
            .update(account, |_, current| {
                let mut record = current.cloned().ok_or(Rejection::NotSubscribed)?;
                if record.verified {
                    return Err(Rejection::AlreadyVerified);
                }
                record.verified = true;
                Ok((record, ()))
            })
            .await?;

        info!(account = %account, handle = %record.external_handle, "account verified");
        Ok(Outcome::Verified)
    }

    async fn task(&self, account: &AccountId) -> Result<Outcome, Rejection> {
        let code = self.new_code()?;
        let now = self.clock.now();
        let eligibility = self.eligibility;
        let issued = self
            .ledger
            .update(account, |_, current| {
                let mut record = current.cloned().ok_or(Rejection::NotSubscribed)?;
                if !record.verified {
                    return Err(Rejection::NotVerified);
                }
                // An outstanding task also holds the window, so repeated
                // requests cannot rotate the code.
                for since in [record.last_task_at, record.task_issued_at] {
                    if !eligibility.cooldown_elapsed(now, since) {
                        return Err(Rejection::CooldownActive {
                            remaining_secs: eligibility.cooldown_remaining(now, since),
                        });
                    }
                }
                record.issue_task(code.clone(), now);
                Ok((record, code))
            })
            .await?;

        info!(account = %account, "task issued");
        Ok(Outcome::TaskIssued { code: issued })
    }

    async fn verify_task(&self, account: &AccountId) -> Result<Outcome, Rejection> {
        let now = self.clock.now();
        let record = self
            .ledger
            .snapshot(account)
            .await
            .ok_or(Rejection::NotSubscribed)?;
        if !record.verified {
            return Err(Rejection::NotVerified);
        }
        if !self.eligibility.cooldown_elapsed(now, record.last_task_at) {
            return Err(Rejection::CooldownActive {
                remaining_secs: self.eligibility.cooldown_remaining(now, record.last_task_at),
            });
        }
        if !record.has_open_task() {
            return Err(Rejection::NoTaskIssued);
        }

        let outcome = self
            .probe
            .probe(record.external_handle.as_str(), &record.proof_code)
            .await;
        if !outcome.is_verified() {
            info!(account = %account, outcome = outcome.as_str(), "task proof not confirmed");
            return Err(Rejection::VerificationFailed);
        }

        let reward = self.params.task_reward;
        let balance = self
            .ledger
            .update(account, |_, current| {
                let mut record = current.cloned().ok_or(Rejection::NotSubscribed)?;
                record.credit_task(reward, now);
                let balance = record.balance;
                Ok((record, balance))
            })
            .await?;

        info!(account = %account, reward, balance, "task rewarded");
        Ok(Outcome::TaskRewarded { reward, balance })
    }

    /// Missing records read as zero balances.
    async fn balance(&self, account: &AccountId) -> Result<Outcome, Rejection> {
        let record = self.ledger.snapshot(account).await;
        Ok(record.map_or(
            Outcome::Balance {
                balance: 0,
                secondary_balance: 0,
            },
            |r| Outcome::Balance {
                balance: r.balance,
                secondary_balance: r.secondary_balance,
            },
        ))
    }

    /// Read-only lookup used by the HTTP API.
    pub async fn record_by_address(&self, address: &str) -> Option<EnrollmentRecord> {
        self.ledger.find_by_address(address).await
    }

    pub async fn record(&self, account: &AccountId) -> Option<EnrollmentRecord> {
        self.ledger.snapshot(account).await
    }

    pub async fn subscription_count(&self) -> usize {
        self.ledger.len().await
    }
}
