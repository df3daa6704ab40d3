/// Service module - the monitor loop
///
/// The loop is the sole driver of the whole lifecycle:
/// - Sweeps the configured host list in declared order, one probe each
/// - Feeds every outcome into the per-host failure tracker
/// - Runs the escalation command when a streak crosses the threshold
/// - Sleeps between sweeps, waking early on shutdown
///
/// Configuration reaches the loop already validated, so the fatal
/// empty-host-list path is handled before a service instance can exist.
/// Shutdown is observed at the top of every iteration and during the
/// inter-sweep sleep; an in-flight probe or remediation command is left
/// to finish on its own.


use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::config::MonitorConfig;
use crate::escalation::{CommandLauncher, EscalationRunner, ShellLauncher};
use crate::monitoring::{FailureTracker, IcmpProber, ProbeExecutor, ProbeOutcome, Prober};

/// Main monitor loop for the vakt service
pub struct PingerService {
    config: MonitorConfig,
    executor: ProbeExecutor,
    tracker: FailureTracker,
    runner: Option<EscalationRunner>,
}

impl PingerService {
    /// Create a service with the production prober and shell launcher
    pub fn new(config: MonitorConfig) -> Result<Self> {
        let prober: Arc<dyn Prober> = Arc::new(IcmpProber::new()?);
        Ok(Self::with_parts(config, prober, Arc::new(ShellLauncher)))
    }

    /// Assemble a service from explicit probe and launch capabilities
    pub fn with_parts(
        config: MonitorConfig,
        prober: Arc<dyn Prober>,
        launcher: Arc<dyn CommandLauncher>,
    ) -> Self {
        let tracker = FailureTracker::new(
            &config.hosts,
            config.failure_threshold,
            config.failure_command.is_some(),
        );
        let runner = config
            .failure_command
            .clone()
            .map(|command| EscalationRunner::new(command, config.failure_threshold, launcher));
        let executor = ProbeExecutor::new(prober, config.timeout);

        Self { config, executor, tracker, runner }
    }

    /// Run sweeps until `shutdown` flips to true
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        info!(
            hosts = self.config.hosts.len(),
            interval_ms = self.config.interval.as_millis() as u64,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "monitor loop starting"
        );
        if self.runner.is_none() {
            info!("no failure_command configured, escalation disabled");
        }

        loop {
            if *shutdown.borrow() {
                break;
            }

            self.sweep().await;

            info!("next sweep in {}ms", self.config.interval.as_millis());
            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                _ = shutdown.changed() => {}
            }
        }

        info!("monitor loop stopped");
        Ok(())
    }

    /// One full pass over the configured host list, in declared order
    async fn sweep(&mut self) {
        info!(hosts = self.config.hosts.len(), "starting sweep");

        for host in self.config.hosts.clone() {
            self.check_host(&host).await;
        }
    }

    async fn check_host(&mut self, host: &str) {
        info!(%host, "probing host");
        let result = self.executor.probe(host).await;

        match result.outcome {
            ProbeOutcome::Success => {
                info!(%host, latency_ms = result.latency_ms.unwrap_or_default(), "host reachable");
            }
            ProbeOutcome::Failure => {
                error!(%host, "host unreachable, no reply within timeout");
            }
            ProbeOutcome::Error => {
                error!(
                    %host,
                    cause = result.cause.as_deref().unwrap_or("unknown"),
                    "unable to probe host"
                );
            }
        }

        let crossed = self.tracker.record(host, result.outcome);
        if result.outcome.is_failure() {
            warn!(
                %host,
                failures = self.tracker.consecutive_failures(host),
                threshold = self.config.failure_threshold,
                "consecutive failure streak"
            );
        }

        if crossed {
            // record() only signals a crossing when a command is configured
            let Some(runner) = &self.runner else { return };

            warn!(
                %host,
                threshold = self.config.failure_threshold,
                "failure threshold reached, launching escalation command"
            );

            match runner.escalate(host).await {
                Ok(event) => {
                    info!(
                        %host,
                        exit_code = ?event.exit_code,
                        stdout = %event.stdout.trim(),
                        stderr = %event.stderr.trim(),
                        "escalation command finished"
                    );
                }
                Err(e) => {
                    error!(%host, error = %e, "failed to launch escalation command");
                }
            }

            self.tracker.reset(host);
        }
    }
}
