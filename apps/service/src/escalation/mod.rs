/// Escalation module - remediation command execution
///
/// Launches the configured failure command as a shell subprocess with
/// captured output when a host's failure streak crosses the threshold.
pub mod launcher;
pub mod runner;

pub use launcher::{CommandLauncher, CommandOutput, ShellLauncher};
pub use runner::{EscalationError, EscalationEvent, EscalationRunner};
