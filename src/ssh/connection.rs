//! SSH transport built on russh
//!
//! Connects, authenticates and hands out exec channels. One transport backs
//! exactly one [`Session`](crate::session::Session).

use std::sync::Arc;
use std::time::Duration;

use russh::client::{self, Handle};
use russh::keys::PrivateKeyWithHashAlg;
use russh::Channel;
use tokio::time::timeout;
use tracing::{debug, error, info};

use super::config::{Credential, SshConfig};
use super::handler::SshHandler;
use crate::error::{PiRemoteError, Result};

/// Connection timeout in seconds
pub const CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Authenticated russh connection
pub struct RusshTransport {
    /// Active SSH session handle (None once closed)
    pub(crate) session: Option<Handle<SshHandler>>,

    /// `user@host:port`, for logs
    label: String,
}

impl RusshTransport {
    /// Connect to the configured host and authenticate
    ///
    /// Every failure here, including an unreachable host or the 30-second
    /// connect timeout, is reported as [`PiRemoteError::Auth`].
    pub async fn connect(config: &SshConfig) -> Result<Self> {
        info!("Connecting to SSH server {}:{}...", config.host, config.port);

        let connection_timeout = Duration::from_secs(CONNECTION_TIMEOUT_SECS);
        let ssh_config = Arc::new(client::Config::default());

        let addr = format!("{}:{}", config.host, config.port);
        let connect_result = timeout(
            connection_timeout,
            client::connect(ssh_config, addr.as_str(), SshHandler::new()),
        )
        .await;

        let mut session = match connect_result {
            Ok(Ok(session)) => session,
            Ok(Err(e)) => {
                error!("SSH connection failed: {}", e);
                return Err(PiRemoteError::auth(format!(
                    "Cannot connect to {}: {}",
                    addr, e
                )));
            }
            Err(_) => {
                error!("SSH connection timeout after {}s", CONNECTION_TIMEOUT_SECS);
                return Err(PiRemoteError::auth(format!(
                    "Connection to {} timed out after {}s",
                    addr, CONNECTION_TIMEOUT_SECS
                )));
            }
        };

        authenticate(&mut session, config).await?;

        info!(
            "Successfully connected to {}@{}:{}",
            config.username, config.host, config.port
        );

        Ok(Self {
            session: Some(session),
            label: format!("{}@{}", config.username, addr),
        })
    }

    /// Open a new session channel
    pub(crate) async fn open_channel(&self, command: &str) -> Result<Channel<client::Msg>> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| PiRemoteError::execution(command, "SSH connection closed"))?;

        session.channel_open_session().await.map_err(|e| {
            PiRemoteError::execution(command, format!("Failed to open channel: {}", e))
        })
    }

    /// Disconnect; a second call is a no-op
    pub async fn disconnect(&mut self) {
        if let Some(session) = self.session.take() {
            let _ = session
                .disconnect(russh::Disconnect::ByApplication, "", "")
                .await;
            info!("SSH connection to {} closed", self.label);
        }
    }
}

/// Authenticate with the configured credential
async fn authenticate(session: &mut Handle<SshHandler>, config: &SshConfig) -> Result<()> {
    match config.credential {
        Some(Credential::Password(ref password)) => {
            debug!(
                "Attempting password authentication for user '{}'",
                config.username
            );
            let auth_result = session
                .authenticate_password(&config.username, password)
                .await
                .map_err(|e| PiRemoteError::auth(e.to_string()))?;

            if auth_result.success() {
                info!("Password authentication successful");
                Ok(())
            } else {
                Err(PiRemoteError::auth(
                    "Cannot connect to the Pi, because login details are incorrect",
                ))
            }
        }
        Some(Credential::PrivateKey(ref key_content)) => {
            debug!(
                "Attempting key authentication for user '{}'",
                config.username
            );

            let key = russh::keys::PrivateKey::from_openssh(key_content.as_bytes())
                .map_err(|e| PiRemoteError::auth(format!("Failed to parse private key: {}", e)))?;

            // None selects the default hash for RSA keys
            let key_with_alg = PrivateKeyWithHashAlg::new(Arc::new(key), None);

            let auth_result = session
                .authenticate_publickey(&config.username, key_with_alg)
                .await
                .map_err(|e| PiRemoteError::auth(e.to_string()))?;

            if auth_result.success() {
                info!("Key authentication successful");
                Ok(())
            } else {
                Err(PiRemoteError::auth("Key authentication rejected"))
            }
        }
        None => Err(PiRemoteError::auth(
            "No authentication method available (require password or private key)",
        )),
    }
}

impl std::fmt::Debug for RusshTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RusshTransport")
            .field("label", &self.label)
            .field("open", &self.session.is_some())
            .finish()
    }
}
