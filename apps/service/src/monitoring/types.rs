/// Outcome of a single reachability probe
///
/// The three variants are mutually exclusive observed outcomes: `Failure`
/// means the check ran but the host did not answer in time, while `Error`
/// means the check could not be performed at all (name resolution, socket
/// setup). Only `Error` carries a diagnostic cause, on the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success,
    Failure,
    Error,
}

impl ProbeOutcome {
    /// Whether this outcome extends a host's consecutive-failure streak
    pub fn is_failure(self) -> bool {
        matches!(self, ProbeOutcome::Failure | ProbeOutcome::Error)
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeOutcome::Success => write!(f, "success"),
            ProbeOutcome::Failure => write!(f, "failure"),
            ProbeOutcome::Error => write!(f, "error"),
        }
    }
}

/// Result of one reachability probe against one host
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Host that was probed, as configured
    pub host: String,

    /// Classified outcome of the probe
    pub outcome: ProbeOutcome,

    /// Round-trip time in milliseconds, when a reply was measured
    pub latency_ms: Option<u64>,

    /// Diagnostic cause, populated only for the `Error` outcome
    pub cause: Option<String>,
}

impl ProbeResult {
    /// Create a result for `host`; the caller classifies it with one of
    /// the consuming constructors below
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            outcome: ProbeOutcome::Error,
            latency_ms: None,
            cause: None,
        }
    }

    /// Mark the host as reachable with the measured round-trip time
    pub fn reachable(mut self, latency_ms: u64) -> Self {
        self.outcome = ProbeOutcome::Success;
        self.latency_ms = Some(latency_ms);
        self
    }

    /// Mark the host as unreachable (probe ran, no reply in time)
    pub fn unreachable(mut self) -> Self {
        self.outcome = ProbeOutcome::Failure;
        self
    }

    /// Mark the probe itself as failed with a diagnostic cause
    pub fn error(mut self, cause: impl Into<String>) -> Self {
        self.outcome = ProbeOutcome::Error;
        self.cause = Some(cause.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_classification() {
        assert!(!ProbeOutcome::Success.is_failure());
        assert!(ProbeOutcome::Failure.is_failure());
        assert!(ProbeOutcome::Error.is_failure());
    }

    #[test]
    fn result_builders() {
        let ok = ProbeResult::new("a").reachable(12);
        assert_eq!(ok.outcome, ProbeOutcome::Success);
        assert_eq!(ok.latency_ms, Some(12));
        assert!(ok.cause.is_none());

        let down = ProbeResult::new("a").unreachable();
        assert_eq!(down.outcome, ProbeOutcome::Failure);
        assert!(down.latency_ms.is_none());

        let err = ProbeResult::new("a").error("no such host");
        assert_eq!(err.outcome, ProbeOutcome::Error);
        assert_eq!(err.cause.as_deref(), Some("no such host"));
    }
}
