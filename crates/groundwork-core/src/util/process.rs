//! Process execution utilities.
//!
//! All external collaborators (git, the optional encryption tool) are driven
//! through these helpers. Calls are blocking with no timeout and no retry;
//! a non-zero exit is reported to the caller, never swallowed.

use groundwork_types::{GroundworkError, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// The outcome of an external command.
#[derive(Debug)]
pub struct CommandOutput {
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Exit code (-1 if terminated by signal)
    pub code: i32,
}

impl CommandOutput {
    /// True when the command exited zero.
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Turn a non-zero exit into an `ExternalTool` error naming the command.
    pub fn require_success(self, what: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(GroundworkError::ExternalTool(format!(
                "{} exited {}: {}",
                what,
                self.code,
                self.stderr.trim()
            )))
        }
    }
}

/// Execute a command in a working directory with extra environment variables,
/// optionally feeding it stdin.
pub fn run_in(
    command: &str,
    args: &[&str],
    cwd: &Path,
    env_vars: &HashMap<String, String>,
    stdin: Option<&str>,
) -> Result<CommandOutput> {
    let mut cmd = Command::new(command);
    cmd.args(args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    for (key, value) in env_vars {
        cmd.env(key, value);
    }

    if stdin.is_some() {
        cmd.stdin(Stdio::piped());
    }

    let mut child = cmd.spawn()?;
    if let (Some(input), Some(handle)) = (stdin, child.stdin.take()) {
        let mut handle = handle;
        handle.write_all(input.as_bytes())?;
        // drop closes the pipe so the child sees EOF
    }

    let output = child.wait_with_output()?;
    Ok(to_command_output(output))
}

/// Execute a command asynchronously in a working directory.
pub async fn run_async_in(command: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
    let output = tokio::process::Command::new(command)
        .args(args)
        .current_dir(cwd)
        .output()
        .await?;
    Ok(to_command_output(output))
}

fn to_command_output(output: std::process::Output) -> CommandOutput {
    CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        code: output.status.code().unwrap_or(-1),
    }
}

/// Redact secrets from command output before it reaches a log line.
pub fn redact_secrets(output: &str, secrets: &[&str]) -> String {
    let mut redacted = output.to_string();
    for secret in secrets {
        if !secret.is_empty() {
            redacted = redacted.replace(secret, "***REDACTED***");
        }
    }
    redacted
}
