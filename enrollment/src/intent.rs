//! Typed commands and the context they are invoked from.

use campaign_types::AccountId;

/// What the caller asks the workflow to do.
///
/// Arguments are carried raw; the workflow validates them inside the same
/// critical section that acts on them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Subscribe { handle: String, address: String },
    Finalize,
    Task,
    VerifyTask,
    Balance,
}

impl Intent {
    /// Commands that may only run from a private conversation.
    pub fn requires_private(&self) -> bool {
        !matches!(self, Intent::Balance)
    }

    /// Commands refused before the campaign start instant.
    pub fn requires_open_campaign(&self) -> bool {
        !matches!(self, Intent::Balance)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Intent::Subscribe { .. } => "subscribe",
            Intent::Finalize => "finalize",
            Intent::Task => "task",
            Intent::VerifyTask => "verify task",
            Intent::Balance => "balance",
        }
    }
}

/// How the caller identifies the record to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Subject {
    /// A chat account; the primary key of the store.
    Account(AccountId),
    /// A chain address, as used by the HTTP API. Matched case-insensitively.
    Address(String),
}

/// Who is asking, and from where.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub subject: Subject,
    /// True for direct messages and for the HTTP API.
    pub private_context: bool,
}

impl Invocation {
    /// A direct-message invocation from a chat account.
    pub fn private(account: AccountId) -> Self {
        Self {
            subject: Subject::Account(account),
            private_context: true,
        }
    }

    /// An invocation from a shared channel.
    pub fn public(account: AccountId) -> Self {
        Self {
            subject: Subject::Account(account),
            private_context: false,
        }
    }

    /// An HTTP API invocation keyed by chain address.
    pub fn by_address(address: impl Into<String>) -> Self {
        Self {
            subject: Subject::Address(address.into()),
            private_context: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_is_the_only_ungated_command() {
        let gated = [
            Intent::Subscribe {
                handle: "a".into(),
                address: "0x".into(),
            },
            Intent::Finalize,
            Intent::Task,
            Intent::VerifyTask,
        ];
        for intent in gated {
            assert!(intent.requires_private(), "{}", intent.name());
            assert!(intent.requires_open_campaign(), "{}", intent.name());
        }
        assert!(!Intent::Balance.requires_private());
        assert!(!Intent::Balance.requires_open_campaign());
    }

    #[test]
    fn address_invocations_are_private() {
        let inv = Invocation::by_address("0xabc");
        assert!(inv.private_context);
        assert_eq!(inv.subject, Subject::Address("0xabc".into()));
        assert!(!Invocation::public(AccountId::new("1")).private_context);
    }
}
