//! Staleness policy: decides when a sync is due.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// A single predicate over the last recorded sync timestamp.
///
/// Stateless beyond the interval: reading the timestamp belongs to
/// the store, writing it to a successful reconciliation pass. A
/// failed pass never refreshes it, so staleness keeps demanding a
/// retry.
#[derive(Debug, Clone, Copy)]
pub struct SyncPolicy {
    interval: Duration,
}

impl SyncPolicy {
    /// Creates a policy with the given staleness interval.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// The configured staleness interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true when a sync is due at `now`.
    ///
    /// True when no sync was ever recorded, or when the elapsed time
    /// since the last one exceeds the interval. A timestamp from the
    /// future (clock skew) counts as fresh.
    pub fn is_stale(&self, last_sync: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_sync {
            None => true,
            Some(last) => match (now - last).to_std() {
                Ok(elapsed) => elapsed > self.interval,
                Err(_) => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn policy() -> SyncPolicy {
        SyncPolicy::new(Duration::from_secs(300))
    }

    #[test]
    fn stale_without_prior_sync() {
        assert!(policy().is_stale(None, Utc::now()));
    }

    #[test]
    fn fresh_immediately_after_sync() {
        let now = Utc::now();
        assert!(!policy().is_stale(Some(now), now));
    }

    #[test]
    fn stale_after_interval_elapses() {
        let now = Utc::now();
        let last = now - ChronoDuration::seconds(301);
        assert!(policy().is_stale(Some(last), now));

        let last = now - ChronoDuration::seconds(299);
        assert!(!policy().is_stale(Some(last), now));
    }

    #[test]
    fn future_timestamp_counts_as_fresh() {
        let now = Utc::now();
        let last = now + ChronoDuration::seconds(60);
        assert!(!policy().is_stale(Some(last), now));
    }
}
