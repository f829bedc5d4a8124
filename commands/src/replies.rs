//! User-facing reply texts.

use crate::ParseError;
use campaign_enrollment::{Outcome, Rejection};
use campaign_types::Timestamp;
use campaign_utils::format_duration;
use chrono::{DateTime, Utc};

/// Replaced by the proof code in post templates.
pub const CODE_PLACEHOLDER: &str = "{code}";

pub const DEFAULT_BOT_NAME: &str = "BootstrapBot";

pub const DEFAULT_SUBSCRIBE_TEMPLATE: &str =
    "I want to be whitelisted for the protocol bootstrap event. Unique code: {code}";

pub const DEFAULT_TASK_TEMPLATE: &str =
    "I am participating in the protocol bootstrap event. Unique code: {code}";

/// Renders outcomes and rejections for the chat surface.
#[derive(Clone, Debug)]
pub struct Replies {
    bot_name: String,
    subscribe_template: String,
    task_template: String,
}

impl Default for Replies {
    fn default() -> Self {
        Self::new(DEFAULT_BOT_NAME, DEFAULT_SUBSCRIBE_TEMPLATE, DEFAULT_TASK_TEMPLATE)
    }
}

impl Replies {
    pub fn new(
        bot_name: impl Into<String>,
        subscribe_template: impl Into<String>,
        task_template: impl Into<String>,
    ) -> Self {
        Self {
            bot_name: bot_name.into(),
            subscribe_template: subscribe_template.into(),
            task_template: task_template.into(),
        }
    }

    pub fn help(&self) -> String {
        let bot = &self.bot_name;
        format!(
            "**Available Commands:**\n\
             1. **@{bot} help** - Displays this help message.\n\
             2. **@{bot} subscribe @handle 0xYourAddress** - (DM only) Subscribe with your social handle and chain address.\n\
             3. **@{bot} finalize** - (DM only) Check that you posted your code to finalize your subscription.\n\
             4. **@{bot} balance** - Check your points balance.\n\
             5. **@{bot} task** - (DM only) Receive a daily task with a unique code to post. Once per day.\n\
             6. **@{bot} verify task** - (DM only) Verify that you posted your daily task code.\n\
             7. **@{bot} countdown** - Time left until the campaign opens."
        )
    }

    pub fn parse_error(&self, error: &ParseError) -> String {
        let bot = &self.bot_name;
        match error {
            ParseError::Empty => {
                format!("No command detected. Type \"@{bot} help\" to see available commands.")
            }
            ParseError::Unknown(verb) => format!(
                "Unknown command \"{verb}\". Type \"@{bot} help\" to see available commands."
            ),
            ParseError::UnknownVerify(sub) => {
                format!("Unknown command \"verify {sub}\". Did you mean \"verify task\"?")
            }
            ParseError::SubscribeUsage => {
                format!("Usage: @{bot} subscribe @handle 0xYourAddress")
            }
        }
    }

    pub fn outcome(&self, outcome: &Outcome) -> String {
        let bot = &self.bot_name;
        match outcome {
            Outcome::Subscribed { code } => format!(
                "Please post the following text on X/Twitter:\n\n\"{}\"\n\n\
                 Once done, use the \"@{bot} finalize\" command to complete the process.",
                fill_template(&self.subscribe_template, code)
            ),
            Outcome::Verified => "Verified successfully. You are now whitelisted!".to_string(),
            Outcome::TaskIssued { code } => format!(
                "Please post this text on X/Twitter to complete your task:\n\n\"{}\"\n\n\
                 Once done, use the \"@{bot} verify task\" command to complete the process.",
                fill_template(&self.task_template, code)
            ),
            Outcome::TaskRewarded { reward, balance } => format!(
                "Verified successfully. {reward} points added, your balance is now {balance} points."
            ),
            Outcome::Balance {
                balance,
                secondary_balance,
            } => {
                if *balance == 0 && *secondary_balance == 0 {
                    "You don't have any points yet. Start participating to earn points!".to_string()
                } else if *secondary_balance == 0 {
                    format!("Your current balance is {balance} points.")
                } else {
                    format!(
                        "Your current balance is {balance} points ({secondary_balance} bonus points)."
                    )
                }
            }
        }
    }

    /// `command` names the refused command in context errors.
    pub fn rejection(&self, command: &str, rejection: &Rejection) -> String {
        let bot = &self.bot_name;
        match rejection {
            Rejection::CampaignClosed { opens_at } => format!(
                "This command will be available after {}.",
                format_utc(*opens_at)
            ),
            Rejection::PrivateContextRequired => {
                format!("The \"{command}\" command can only be used in a direct message.")
            }
            Rejection::NotSubscribed => format!(
                "Please subscribe first using \"@{bot} subscribe @handle 0xYourAddress\"."
            ),
            Rejection::NotVerified => {
                format!("Please finalize your subscription first with \"@{bot} finalize\".")
            }
            Rejection::NoTaskIssued => {
                format!("You have no task in progress. Request one with \"@{bot} task\".")
            }
            Rejection::CooldownActive { remaining_secs } => format!(
                "You can only complete one task per day. Please try again in {}.",
                format_duration(*remaining_secs)
            ),
            Rejection::VerificationFailed => {
                "Verification failed. Please make sure you posted the correct code.".to_string()
            }
            other => capitalize(&other.to_string()),
        }
    }

    /// `remaining` is the number of seconds until `opens_at`.
    pub fn countdown(&self, opens_at: Timestamp, remaining: u64) -> String {
        if remaining == 0 {
            "The campaign has started!".to_string()
        } else {
            format!(
                "The campaign opens in {} ({}).",
                format_duration(remaining),
                format_utc(opens_at)
            )
        }
    }
}

/// Substitute every `{code}` in `template`; append the code if absent.
pub fn fill_template(template: &str, code: &str) -> String {
    if template.contains(CODE_PLACEHOLDER) {
        template.replace(CODE_PLACEHOLDER, code)
    } else {
        format!("{template} {code}")
    }
}

/// `December 7, 2024 00:00 UTC`.
pub fn format_utc(ts: Timestamp) -> String {
    i64::try_from(ts.as_secs())
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.format("%B %-d, %Y %H:%M UTC").to_string())
        .unwrap_or_else(|| format!("{} (unix time)", ts.as_secs()))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>() + ".",
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_fills_code() {
        assert_eq!(fill_template("code: {code}!", "a1b2c3d4"), "code: a1b2c3d4!");
        assert_eq!(fill_template("no placeholder", "a1b2c3d4"), "no placeholder a1b2c3d4");
    }

    #[test]
    fn campaign_start_in_utc() {
        assert_eq!(
            format_utc(Timestamp::new(1_733_529_600)),
            "December 7, 2024 00:00 UTC"
        );
    }

    #[test]
    fn subscribe_reply_carries_code_and_next_step() {
        let replies = Replies::default();
        let text = replies.outcome(&Outcome::Subscribed {
            code: "a1b2c3d4".into(),
        });
        assert!(text.contains("Unique code: a1b2c3d4"));
        assert!(text.contains("@BootstrapBot finalize"));
    }

    #[test]
    fn zero_balance_encourages() {
        let replies = Replies::default();
        let text = replies.outcome(&Outcome::Balance {
            balance: 0,
            secondary_balance: 0,
        });
        assert!(text.starts_with("You don't have any points yet"));
        let text = replies.outcome(&Outcome::Balance {
            balance: 3000,
            secondary_balance: 0,
        });
        assert_eq!(text, "Your current balance is 3000 points.");
    }

    #[test]
    fn rejections_read_as_sentences() {
        let replies = Replies::default();
        assert_eq!(
            replies.rejection("task", &Rejection::PrivateContextRequired),
            "The \"task\" command can only be used in a direct message."
        );
        assert_eq!(
            replies.rejection("subscribe", &Rejection::AlreadyRegistered),
            "You are already registered."
        );
        assert!(replies
            .rejection("task", &Rejection::CooldownActive { remaining_secs: 7200 })
            .ends_with("try again in 2h 0m."));
        assert_eq!(
            replies.rejection(
                "finalize",
                &Rejection::CampaignClosed {
                    opens_at: Timestamp::new(1_733_529_600)
                }
            ),
            "This command will be available after December 7, 2024 00:00 UTC."
        );
    }

    #[test]
    fn countdown_before_and_after() {
        let replies = Replies::default();
        let start = Timestamp::new(1_000_000);
        assert!(replies
            .countdown(start, 90_000)
            .starts_with("The campaign opens in 1d 1h"));
        assert_eq!(
            replies.countdown(start, 0),
            "The campaign has started!"
        );
    }
}
