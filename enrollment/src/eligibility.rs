//! Campaign gate and per-account cooldown windows.

use campaign_types::{CampaignParams, Timestamp};

/// True once `now` is at or after `start`.
pub fn is_campaign_open(now: Timestamp, start: Timestamp) -> bool {
    now >= start
}

/// True if there is no previous task, or at least `cooldown_secs` have passed
/// since it.
pub fn cooldown_elapsed(now: Timestamp, last: Option<Timestamp>, cooldown_secs: u64) -> bool {
    match last {
        None => true,
        Some(last) => last.has_expired(cooldown_secs, now),
    }
}

/// Pure time-gate evaluation against a fixed start instant and cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EligibilityClock {
    campaign_start: Timestamp,
    cooldown_secs: u64,
}

impl EligibilityClock {
    pub fn new(campaign_start: Timestamp, cooldown_secs: u64) -> Self {
        Self {
            campaign_start,
            cooldown_secs,
        }
    }

    pub fn from_params(params: &CampaignParams) -> Self {
        Self::new(params.campaign_start, params.task_cooldown_secs)
    }

    pub fn campaign_start(&self) -> Timestamp {
        self.campaign_start
    }

    pub fn is_campaign_open(&self, now: Timestamp) -> bool {
        is_campaign_open(now, self.campaign_start)
    }

    /// Seconds left until the campaign opens; zero once open.
    pub fn until_open(&self, now: Timestamp) -> u64 {
        self.campaign_start.secs_until(now)
    }

    pub fn cooldown_elapsed(&self, now: Timestamp, last: Option<Timestamp>) -> bool {
        cooldown_elapsed(now, last, self.cooldown_secs)
    }

    /// Seconds left in the cooldown window started at `last`; zero if elapsed.
    pub fn cooldown_remaining(&self, now: Timestamp, last: Option<Timestamp>) -> u64 {
        match last {
            None => 0,
            Some(last) => self
                .cooldown_secs
                .saturating_sub(last.elapsed_since(now)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: u64 = 86_400;

    #[test]
    fn campaign_opens_at_exact_start() {
        let start = Timestamp::new(1_733_529_600);
        assert!(!is_campaign_open(Timestamp::new(1_733_529_599), start));
        assert!(is_campaign_open(start, start));
        assert!(is_campaign_open(Timestamp::new(1_733_529_601), start));
    }

    #[test]
    fn no_previous_task_means_elapsed() {
        assert!(cooldown_elapsed(Timestamp::new(0), None, DAY));
    }

    #[test]
    fn cooldown_boundary_is_inclusive() {
        let last = Some(Timestamp::new(1_000));
        assert!(!cooldown_elapsed(Timestamp::new(1_000 + DAY - 1), last, DAY));
        assert!(cooldown_elapsed(Timestamp::new(1_000 + DAY), last, DAY));
    }

    #[test]
    fn clock_in_the_past_is_not_elapsed() {
        let last = Some(Timestamp::new(5_000));
        assert!(!cooldown_elapsed(Timestamp::new(4_000), last, DAY));
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let clock = EligibilityClock::new(Timestamp::EPOCH, DAY);
        let last = Some(Timestamp::new(100));
        assert_eq!(clock.cooldown_remaining(Timestamp::new(100), last), DAY);
        assert_eq!(clock.cooldown_remaining(Timestamp::new(100 + DAY / 2), last), DAY / 2);
        assert_eq!(clock.cooldown_remaining(Timestamp::new(100 + 2 * DAY), last), 0);
        assert_eq!(clock.cooldown_remaining(Timestamp::new(100), None), 0);
    }

    #[test]
    fn until_open() {
        let clock = EligibilityClock::new(Timestamp::new(1_000), DAY);
        assert_eq!(clock.until_open(Timestamp::new(400)), 600);
        assert_eq!(clock.until_open(Timestamp::new(1_000)), 0);
    }
}
