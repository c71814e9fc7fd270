//! The remote-execution boundary
//!
//! A [`Session`](crate::session::Session) only ever talks to a `Transport`.
//! [`RusshTransport`] is the production implementation; anything else that
//! can run a shell command string on the remote host can stand in for it.

use async_trait::async_trait;

use super::command::CommandOutput;
use super::connection::RusshTransport;
use crate::error::Result;

/// An authenticated channel to a remote shell
#[async_trait]
pub trait Transport: Send {
    /// Run `command` and wait for it to finish
    async fn run(&mut self, command: &str) -> Result<CommandOutput>;

    /// Best-effort cancellation of a command whose caller gave up waiting
    async fn abort(&mut self, _command: &str) {}

    /// Release the connection
    async fn close(&mut self);
}

#[async_trait]
impl Transport for RusshTransport {
    async fn run(&mut self, command: &str) -> Result<CommandOutput> {
        self.exec_command(command).await
    }

    async fn abort(&mut self, command: &str) {
        self.abort_command(command).await
    }

    async fn close(&mut self) {
        self.disconnect().await
    }
}
