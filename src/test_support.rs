//! In-memory transport for unit tests

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{PiRemoteError, Result};
use crate::session::Session;
use crate::ssh::command::CommandOutput;
use crate::ssh::config::SshConfig;
use crate::ssh::transport::Transport;

#[derive(Debug, Default)]
struct LogState {
    commands: Vec<String>,
    aborted: Vec<String>,
    close_count: usize,
}

/// Shared view of everything a [`RecordingTransport`] was asked to do
#[derive(Debug, Clone, Default)]
pub struct TransportLog(Arc<Mutex<LogState>>);

impl TransportLog {
    pub fn commands(&self) -> Vec<String> {
        self.0.lock().unwrap().commands.clone()
    }

    pub fn aborted(&self) -> Vec<String> {
        self.0.lock().unwrap().aborted.clone()
    }

    pub fn close_count(&self) -> usize {
        self.0.lock().unwrap().close_count
    }

    pub fn closed(&self) -> bool {
        self.close_count() > 0
    }
}

/// Records commands and answers them from a script
///
/// Unscripted commands succeed with empty output.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    responses: HashMap<String, String>,
    hanging: HashSet<String>,
    failing: HashSet<String>,
    log: TransportLog,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command: &str, stdout: &str) -> Self {
        self.responses.insert(command.to_string(), stdout.to_string());
        self
    }

    pub fn hang_on(mut self, command: &str) -> Self {
        self.hanging.insert(command.to_string());
        self
    }

    pub fn fail_on(mut self, command: &str) -> Self {
        self.failing.insert(command.to_string());
        self
    }

    pub fn log(&self) -> TransportLog {
        self.log.clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn run(&mut self, command: &str) -> Result<CommandOutput> {
        self.log.0.lock().unwrap().commands.push(command.to_string());

        if self.hanging.contains(command) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.failing.contains(command) {
            return Err(PiRemoteError::execution(command, "channel closed"));
        }

        let stdout = self.responses.get(command).cloned().unwrap_or_default();
        Ok(CommandOutput::from_stdout(stdout))
    }

    async fn abort(&mut self, command: &str) {
        self.log.0.lock().unwrap().aborted.push(command.to_string());
    }

    async fn close(&mut self) {
        self.log.0.lock().unwrap().close_count += 1;
    }
}

/// Session over a recording transport, plus the transport's log
pub fn session_with(config: SshConfig, transport: RecordingTransport) -> (Session, TransportLog) {
    let log = transport.log();
    (Session::with_transport(&config, transport), log)
}
