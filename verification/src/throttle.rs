//! Process-wide minimum spacing between external lookups.
//!
//! Independent of per-user cooldowns: it protects the lookup collaborator's
//! rate limit, not campaign fairness.

use campaign_types::{Clock, Timestamp};
use std::sync::{Arc, Mutex};

/// Admits at most one lookup per `interval_secs`.
///
/// The check and the timestamp update happen under one lock, so two
/// concurrent callers can never both be admitted inside the same window. A
/// poisoned lock refuses every call.
pub struct ProbeThrottle {
    interval_secs: u64,
    last_call: Mutex<Option<Timestamp>>,
    clock: Arc<dyn Clock>,
}

impl ProbeThrottle {
    pub fn new(interval_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            interval_secs,
            last_call: Mutex::new(None),
            clock,
        }
    }

    /// Claim the next lookup slot. Returns `false` if the previous admitted
    /// call was less than `interval_secs` ago.
    pub fn try_acquire(&self) -> bool {
        let now = self.clock.now();
        let Ok(mut last) = self.last_call.lock() else {
            return false;
        };
        match *last {
            Some(prev) if prev.elapsed_since(now) < self.interval_secs => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    /// When the last admitted call happened.
    pub fn last_call(&self) -> Option<Timestamp> {
        self.last_call.lock().ok().and_then(|l| *l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_nullables::NullClock;

    fn throttle(interval: u64) -> (Arc<NullClock>, ProbeThrottle) {
        let clock = Arc::new(NullClock::new(1_000));
        let throttle = ProbeThrottle::new(interval, clock.clone());
        (clock, throttle)
    }

    #[test]
    fn first_call_is_admitted() {
        let (_clock, t) = throttle(10);
        assert!(t.try_acquire());
        assert_eq!(t.last_call(), Some(Timestamp::new(1_000)));
    }

    #[test]
    fn second_call_inside_window_is_refused() {
        let (clock, t) = throttle(10);
        assert!(t.try_acquire());
        clock.advance(9);
        assert!(!t.try_acquire());
        // A refused call does not push the window forward.
        assert_eq!(t.last_call(), Some(Timestamp::new(1_000)));
    }

    #[test]
    fn call_at_window_edge_is_admitted() {
        let (clock, t) = throttle(10);
        assert!(t.try_acquire());
        clock.advance(10);
        assert!(t.try_acquire());
        assert_eq!(t.last_call(), Some(Timestamp::new(1_010)));
    }

    #[test]
    fn zero_interval_never_throttles() {
        let (_clock, t) = throttle(0);
        assert!(t.try_acquire());
        assert!(t.try_acquire());
        assert!(t.try_acquire());
    }

    #[test]
    fn concurrent_callers_admit_exactly_one() {
        let (_clock, t) = throttle(10);
        let t = Arc::new(t);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let t = t.clone();
                std::thread::spawn(move || t.try_acquire())
            })
            .collect();
        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(admitted, 1);
    }
}
