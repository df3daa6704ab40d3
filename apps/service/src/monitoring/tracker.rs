use std::collections::HashMap;

use super::types::ProbeOutcome;

/// Per-host consecutive-failure accounting
///
/// One counter per configured host, created at startup and kept for the
/// life of the process. A counter resets to exactly 0 on success (or via
/// [`FailureTracker::reset`] after an escalation attempt) and is never
/// decremented gradually.
///
/// When no failure command is configured the tracker still counts, so
/// streak progress stays observable in the logs, but `record` never
/// signals a crossing.
pub struct FailureTracker {
    counters: HashMap<String, u32>,
    threshold: u32,
    escalation_enabled: bool,
}

impl FailureTracker {
    pub fn new(hosts: &[String], threshold: u32, escalation_enabled: bool) -> Self {
        let counters = hosts.iter().map(|h| (h.clone(), 0)).collect();
        Self { counters, threshold, escalation_enabled }
    }

    /// Record one probe outcome for `host`
    ///
    /// Returns true exactly when this call crossed the failure threshold.
    /// An uninterrupted streak signals again every `threshold` failures;
    /// the sweep loop resets the counter after each escalation attempt,
    /// so in live operation each signal corresponds to one full streak.
    pub fn record(&mut self, host: &str, outcome: ProbeOutcome) -> bool {
        let counter = self.counters.entry(host.to_string()).or_insert(0);

        if !outcome.is_failure() {
            *counter = 0;
            return false;
        }

        *counter += 1;
        self.escalation_enabled && *counter % self.threshold == 0
    }

    /// Reset `host`'s counter, so the next failure starts a fresh streak
    pub fn reset(&mut self, host: &str) {
        self.counters.insert(host.to_string(), 0);
    }

    /// Current streak length for `host`
    pub fn consecutive_failures(&self, host: &str) -> u32 {
        self.counters.get(host).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn success_always_resets_to_zero() {
        let mut tracker = FailureTracker::new(&hosts(&["a"]), 3, true);

        for _ in 0..5 {
            tracker.record("a", ProbeOutcome::Failure);
        }
        assert_eq!(tracker.consecutive_failures("a"), 5);

        assert!(!tracker.record("a", ProbeOutcome::Success));
        assert_eq!(tracker.consecutive_failures("a"), 0);
    }

    #[test]
    fn counter_tracks_consecutive_failures_exactly() {
        let mut tracker = FailureTracker::new(&hosts(&["a"]), 3, true);

        for n in 1..=7 {
            let crossed = tracker.record("a", ProbeOutcome::Failure);
            assert_eq!(tracker.consecutive_failures("a"), n);
            assert_eq!(crossed, n % 3 == 0, "signal mismatch at failure {n}");
        }
    }

    #[test]
    fn error_outcomes_count_like_failures() {
        let mut tracker = FailureTracker::new(&hosts(&["a"]), 2, true);

        assert!(!tracker.record("a", ProbeOutcome::Error));
        assert!(tracker.record("a", ProbeOutcome::Failure));
        assert_eq!(tracker.consecutive_failures("a"), 2);
    }

    #[test]
    fn reset_starts_a_fresh_streak() {
        let mut tracker = FailureTracker::new(&hosts(&["a"]), 2, true);

        tracker.record("a", ProbeOutcome::Failure);
        assert!(tracker.record("a", ProbeOutcome::Failure));
        tracker.reset("a");
        assert_eq!(tracker.consecutive_failures("a"), 0);

        assert!(!tracker.record("a", ProbeOutcome::Failure));
        assert!(tracker.record("a", ProbeOutcome::Failure));
    }

    #[test]
    fn disabled_escalation_counts_but_never_signals() {
        let mut tracker = FailureTracker::new(&hosts(&["a"]), 3, false);

        for _ in 0..100 {
            assert!(!tracker.record("a", ProbeOutcome::Failure));
        }
        assert_eq!(tracker.consecutive_failures("a"), 100);
    }

    #[test]
    fn hosts_are_tracked_independently() {
        let mut tracker = FailureTracker::new(&hosts(&["a", "b"]), 2, true);

        tracker.record("a", ProbeOutcome::Failure);
        assert_eq!(tracker.consecutive_failures("a"), 1);
        assert_eq!(tracker.consecutive_failures("b"), 0);

        assert!(!tracker.record("b", ProbeOutcome::Failure));
        assert!(tracker.record("a", ProbeOutcome::Failure));
    }
}
