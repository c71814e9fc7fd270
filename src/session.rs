//! Authenticated remote shell session
//!
//! A [`Session`] owns one transport and runs one command at a time. Every
//! operation takes `&mut self`; callers that want parallelism open more
//! sessions.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::commands::CommandBuilder;
use crate::error::{PiRemoteError, Result};
use crate::ssh::command::CommandOutput;
use crate::ssh::config::SshConfig;
use crate::ssh::connection::RusshTransport;
use crate::ssh::sanitize::validate_command;
use crate::ssh::transport::Transport;

/// One live, authenticated connection to a remote host
pub struct Session {
    host: String,
    user: String,
    port: u16,
    connected: bool,
    elevated: bool,
    timeout: Option<Duration>,
    max_chars: Option<usize>,
    pub(crate) commands: CommandBuilder,
    transport: Box<dyn Transport>,
}

impl Session {
    /// Connect and authenticate over SSH
    ///
    /// Fails with [`PiRemoteError::Auth`] when the host cannot be reached or
    /// the credential is rejected. No session exists in that case.
    pub async fn open(config: &SshConfig) -> Result<Self> {
        let transport = RusshTransport::connect(config).await?;
        Ok(Self::with_transport(config, transport))
    }

    /// Wrap a transport that has already authenticated
    pub fn with_transport(config: &SshConfig, transport: impl Transport + 'static) -> Self {
        Self {
            host: config.host.clone(),
            user: config.username.clone(),
            port: config.port,
            connected: true,
            elevated: config.elevated,
            timeout: config.timeout,
            max_chars: config.max_chars,
            commands: CommandBuilder::new(config.argument_quoting),
            transport: Box::new(transport),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The elevated flag given at open time; never queried remotely
    pub fn is_elevated(&self) -> bool {
        self.elevated
    }

    /// Run a command, bounded by the session's default timeout if it has one
    pub async fn execute(&mut self, command: &str) -> Result<CommandOutput> {
        self.run(command, self.timeout).await
    }

    /// Run a command, giving up after `limit`
    ///
    /// On expiry the transport is asked to abort the remote process and the
    /// call fails with [`PiRemoteError::Execution`].
    pub async fn execute_with_timeout(
        &mut self,
        command: &str,
        limit: Duration,
    ) -> Result<CommandOutput> {
        self.run(command, Some(limit)).await
    }

    async fn run(&mut self, command: &str, limit: Option<Duration>) -> Result<CommandOutput> {
        if !self.connected {
            return Err(PiRemoteError::execution(command, "session is closed"));
        }
        validate_command(command, self.max_chars)?;

        debug!("{}@{}: {}", self.user, self.host, command);

        let Some(limit) = limit else {
            return self.transport.run(command).await;
        };

        match timeout(limit, self.transport.run(command)).await {
            Ok(output) => output,
            Err(_) => {
                warn!(
                    "Command timed out after {}ms, attempting abort",
                    limit.as_millis()
                );
                self.transport.abort(command).await;
                Err(PiRemoteError::timeout(command, limit.as_millis() as u64))
            }
        }
    }

    /// Disconnect; later commands fail without touching the transport
    pub async fn close(&mut self) {
        if self.connected {
            self.connected = false;
            self.transport.close().await;
            info!("Session to {}@{}:{} closed", self.user, self.host, self.port);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("connected", &self.connected)
            .field("elevated", &self.elevated)
            .finish()
    }
}
