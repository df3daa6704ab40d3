use std::sync::Arc;

use super::launcher::CommandLauncher;

/// Record of one escalation attempt that launched successfully
#[derive(Debug, Clone)]
pub struct EscalationEvent {
    /// Host whose failure streak triggered the escalation
    pub host: String,
    /// Threshold that was crossed
    pub threshold: u32,
    /// Exit code of the remediation command, when reported
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Error type for escalation attempts
#[derive(Debug, thiserror::Error)]
pub enum EscalationError {
    /// The remediation command could not be started
    #[error("failed to launch escalation command: {0}")]
    Launch(#[from] std::io::Error),
}

/// Escalation runner - invokes the configured remediation command
///
/// Invoked only when a host's tracker signals a threshold crossing. The
/// command is awaited to completion before the sweep moves on, so a slow
/// command delays the remaining hosts. The command's own exit code is
/// reported, not judged.
pub struct EscalationRunner {
    command: String,
    threshold: u32,
    launcher: Arc<dyn CommandLauncher>,
}

impl EscalationRunner {
    pub fn new(command: String, threshold: u32, launcher: Arc<dyn CommandLauncher>) -> Self {
        Self { command, threshold, launcher }
    }

    /// Run the remediation command for `host` and capture its output
    pub async fn escalate(&self, host: &str) -> Result<EscalationEvent, EscalationError> {
        let output = self.launcher.launch(&self.command).await?;

        Ok(EscalationEvent {
            host: host.to_string(),
            threshold: self.threshold,
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escalation::launcher::CommandOutput;
    use std::sync::Mutex;

    struct RecordingLauncher {
        commands: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl CommandLauncher for RecordingLauncher {
        async fn launch(&self, command: &str) -> std::io::Result<CommandOutput> {
            self.commands.lock().unwrap().push(command.to_string());
            Ok(CommandOutput {
                exit_code: Some(0),
                stdout: "restarted".to_string(),
                stderr: String::new(),
            })
        }
    }

    struct BrokenLauncher;

    #[async_trait::async_trait]
    impl CommandLauncher for BrokenLauncher {
        async fn launch(&self, _command: &str) -> std::io::Result<CommandOutput> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such executable"))
        }
    }

    #[tokio::test]
    async fn escalate_runs_the_configured_command() {
        let launcher = Arc::new(RecordingLauncher { commands: Mutex::new(Vec::new()) });
        let runner = EscalationRunner::new("notify admins".to_string(), 3, launcher.clone());

        let event = runner.escalate("host-a").await.unwrap();

        assert_eq!(event.host, "host-a");
        assert_eq!(event.threshold, 3);
        assert_eq!(event.exit_code, Some(0));
        assert_eq!(event.stdout, "restarted");
        assert_eq!(*launcher.commands.lock().unwrap(), vec!["notify admins".to_string()]);
    }

    #[tokio::test]
    async fn launch_failure_surfaces_as_typed_error() {
        let runner = EscalationRunner::new("missing".to_string(), 3, Arc::new(BrokenLauncher));

        let err = runner.escalate("host-a").await.unwrap_err();
        assert!(matches!(err, EscalationError::Launch(_)));
        assert!(err.to_string().contains("failed to launch"));
    }
}
