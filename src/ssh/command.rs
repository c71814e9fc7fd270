//! Command execution over SSH
//!
//! Provides the `CommandOutput` struct and the exec-channel plumbing of
//! [`RusshTransport`].

use std::time::Duration;

use russh::ChannelMsg;
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, error};

use super::connection::RusshTransport;
use super::sanitize::escape_for_shell;
use crate::error::{PiRemoteError, Result};

/// Output from a command execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    /// Standard output from the command
    pub stdout: String,

    /// Standard error from the command
    pub stderr: String,

    /// Exit code of the command (if available)
    pub exit_code: Option<u32>,
}

impl CommandOutput {
    /// Create a new empty CommandOutput
    pub fn new() -> Self {
        Self::default()
    }

    /// Output consisting of stdout only, with exit code 0
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    /// Check if the command succeeded (exit code 0 or no exit code available)
    pub fn success(&self) -> bool {
        self.exit_code.is_none_or(|code| code == 0)
    }

    /// Get combined output (stdout + stderr)
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }

    /// True when stdout, trimmed, is exactly `sentinel`
    pub fn matches_sentinel(&self, sentinel: &str) -> bool {
        self.stdout.trim() == sentinel
    }
}

impl RusshTransport {
    /// Execute a command on a new exec channel and wait for it to close
    pub(crate) async fn exec_command(&self, command: &str) -> Result<CommandOutput> {
        let channel = self.open_channel(command).await?;

        channel.exec(true, command).await.map_err(|e| {
            PiRemoteError::execution(command, format!("Failed to exec command: {}", e))
        })?;

        collect_channel_output(channel).await
    }

    /// Attempt to abort a running command by killing matching processes
    ///
    /// Sends `timeout 3s pkill -f 'command' 2>/dev/null || true` on a fresh
    /// channel and waits at most five seconds for it.
    pub(crate) async fn abort_command(&self, command: &str) {
        let abort_cmd = format!(
            "timeout 3s pkill -f '{}' 2>/dev/null || true",
            escape_for_shell(command)
        );

        let channel = match self.open_channel(&abort_cmd).await {
            Ok(ch) => ch,
            Err(e) => {
                error!("Failed to open channel for abort: {}", e);
                return;
            }
        };

        debug!("Sending abort command: {}", abort_cmd);

        if let Err(e) = channel.exec(true, abort_cmd.as_str()).await {
            error!("Failed to exec abort command: {}", e);
            return;
        }

        let _ = timeout(Duration::from_secs(5), async {
            let mut channel = channel;
            while let Some(msg) = channel.wait().await {
                if matches!(msg, ChannelMsg::Close | ChannelMsg::Eof) {
                    break;
                }
            }
        })
        .await;

        debug!("Abort command completed");
    }
}

/// Collect output from a channel until it closes
async fn collect_channel_output(
    mut channel: russh::Channel<russh::client::Msg>,
) -> Result<CommandOutput> {
    let mut output = CommandOutput::new();

    while let Some(msg) = channel.wait().await {
        match msg {
            ChannelMsg::Data { data } => {
                output.stdout.push_str(&String::from_utf8_lossy(&data));
            }
            ChannelMsg::ExtendedData { data, ext } => {
                // ext == 1 is stderr
                if ext == 1 {
                    output.stderr.push_str(&String::from_utf8_lossy(&data));
                } else {
                    output.stdout.push_str(&String::from_utf8_lossy(&data));
                }
            }
            ChannelMsg::ExitStatus { exit_status } => {
                output.exit_code = Some(exit_status);
            }
            ChannelMsg::Close => break,
            _ => {}
        }
    }

    debug!(
        "Command completed: exit_code={:?}, stdout_len={}, stderr_len={}",
        output.exit_code,
        output.stdout.len(),
        output.stderr.len()
    );

    Ok(output)
}
