//! SSH client handler implementation
//!
//! Implements the `russh::client::Handler` trait to handle SSH connection events.

use tracing::debug;

/// SSH client handler for russh
///
/// Accepts every server key. A Pi on the local network usually has a freshly
/// generated host key after each reflash, so there is nothing stable to pin.
#[derive(Debug, Clone, Default)]
pub struct SshHandler;

impl SshHandler {
    /// Create a new SSH handler
    pub fn new() -> Self {
        Self
    }
}

impl russh::client::Handler for SshHandler {
    type Error = anyhow::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &russh::keys::PublicKey,
    ) -> Result<bool, Self::Error> {
        debug!("Accepting server key ({})", server_public_key.algorithm());
        Ok(true)
    }
}
