use std::process::Stdio;

/// Captured output of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Process exit code, when the platform reports one
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Launcher trait for running a command line as a shell subprocess
///
/// The concrete shell/interpreter selection belongs to the launcher, not
/// to the escalation logic that uses it.
#[async_trait::async_trait]
pub trait CommandLauncher: Send + Sync {
    /// Start `command`, wait for it to exit, and return captured output
    async fn launch(&self, command: &str) -> std::io::Result<CommandOutput>;
}

/// Shell launcher backed by the host platform's command interpreter
///
/// Runs `sh -c` on Unix and `cmd /C` on Windows, detached from any
/// interactive console, with stdout and stderr captured.
pub struct ShellLauncher;

#[async_trait::async_trait]
impl CommandLauncher for ShellLauncher {
    async fn launch(&self, command: &str) -> std::io::Result<CommandOutput> {
        let (shell, arg) = if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") };

        let output = tokio::process::Command::new(shell)
            .arg(arg)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
