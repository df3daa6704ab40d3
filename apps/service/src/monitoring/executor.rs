use std::sync::Arc;
use std::time::Duration;

use super::prober::{PingReply, Prober};
use super::types::ProbeResult;

/// Probe executor - issues individual reachability checks
///
/// Every fault inside the prober is converted into the `Error` outcome;
/// `probe` never returns `Err` and a misbehaving host cannot take down
/// the sweep that called it. Retry policy lives with the caller.
pub struct ProbeExecutor {
    prober: Arc<dyn Prober>,
    timeout: Duration,
}

impl ProbeExecutor {
    pub fn new(prober: Arc<dyn Prober>, timeout: Duration) -> Self {
        Self { prober, timeout }
    }

    /// Execute one bounded reachability check against `host`
    pub async fn probe(&self, host: &str) -> ProbeResult {
        let result = ProbeResult::new(host);

        match self.prober.ping(host, self.timeout).await {
            Ok(PingReply::Reply { rtt }) => result.reachable(rtt.as_millis() as u64),
            Ok(PingReply::TimedOut) => result.unreachable(),
            Err(e) => result.error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::types::ProbeOutcome;
    use anyhow::anyhow;

    struct FixedProber(Result<PingReply, String>);

    #[async_trait::async_trait]
    impl Prober for FixedProber {
        async fn ping(&self, _host: &str, _timeout: Duration) -> anyhow::Result<PingReply> {
            self.0.clone().map_err(|e| anyhow!(e))
        }
    }

    fn executor(reply: Result<PingReply, String>) -> ProbeExecutor {
        ProbeExecutor::new(Arc::new(FixedProber(reply)), Duration::from_millis(100))
    }

    #[tokio::test]
    async fn reply_classifies_as_success_with_latency() {
        let result = executor(Ok(PingReply::Reply { rtt: Duration::from_millis(42) }))
            .probe("host-a")
            .await;

        assert_eq!(result.outcome, ProbeOutcome::Success);
        assert_eq!(result.latency_ms, Some(42));
        assert_eq!(result.host, "host-a");
    }

    #[tokio::test]
    async fn timeout_classifies_as_failure() {
        let result = executor(Ok(PingReply::TimedOut)).probe("host-a").await;

        assert_eq!(result.outcome, ProbeOutcome::Failure);
        assert!(result.latency_ms.is_none());
        assert!(result.cause.is_none());
    }

    #[tokio::test]
    async fn prober_fault_classifies_as_error_with_cause() {
        let result = executor(Err("resolution failed".to_string())).probe("host-a").await;

        assert_eq!(result.outcome, ProbeOutcome::Error);
        assert_eq!(result.cause.as_deref(), Some("resolution failed"));
    }
}
