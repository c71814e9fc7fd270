//! SSH transport module
//!
//! This module provides the russh-backed transport, its configuration, and
//! the helpers for privileged command forms and argument quoting.

pub mod command;
pub mod config;
pub mod connection;
pub mod elevation;
pub mod handler;
pub mod sanitize;
pub mod transport;

// Re-exports
pub use command::CommandOutput;
pub use config::{Credential, SshConfig};
pub use connection::RusshTransport;
pub use handler::SshHandler;
pub use sanitize::{escape_for_shell, quote_argument, validate_command, ArgumentQuoting};
pub use transport::Transport;
