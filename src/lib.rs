//! pi-remote - remote control for a Raspberry Pi over SSH
//!
//! Opens one SSH session to a host and runs canned shell commands on it:
//! reboot, shutdown, kill, directory management, still pictures and
//! timelapses. Every operation is a command string handed to
//! [`Session::execute`]; the remote output comes back as [`CommandOutput`].
//!
//! # Example
//!
//! ```no_run
//! use pi_remote::{AttributeSet, Session, SshConfig};
//!
//! # async fn run() -> pi_remote::Result<()> {
//! let config = SshConfig::new("raspberrypi.local", "pi").with_password("raspberry");
//! let mut session = Session::open(&config).await?;
//!
//! session
//!     .make_directory("photos", &AttributeSet::new().with("-p", ""))
//!     .await?;
//! session.take_picture("photos/now.jpg").await?;
//! session.close().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Shell injection
//!
//! Arguments are concatenated into the command line as given. A directory
//! name such as `x; reboot` runs `reboot`. Set
//! [`ArgumentQuoting::Quoted`] on the config to single-quote every
//! caller-supplied argument instead.

pub mod attributes;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod operations;
pub mod session;
pub mod ssh;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use attributes::AttributeSet;
pub use cli::{Operation, Outcome};
pub use commands::{CommandBuilder, Timelapse};
pub use config::{Args, Config};
pub use error::{PiRemoteError, Result};
pub use session::Session;
pub use ssh::{ArgumentQuoting, CommandOutput, Credential, SshConfig, Transport};
