//! SSH configuration types
//!
//! Connection parameters, credentials and per-session options.

use std::time::Duration;

use super::sanitize::ArgumentQuoting;

/// Default SSH port
pub const DEFAULT_PORT: u16 = 22;

/// Credential presented to the remote host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Password authentication
    Password(String),

    /// Private key content (not path!) in OpenSSH format
    PrivateKey(String),
}

/// SSH connection configuration
#[derive(Debug, Clone)]
pub struct SshConfig {
    /// Remote hostname or IP address
    pub host: String,

    /// SSH port (default: 22)
    pub port: u16,

    /// Username for authentication
    pub username: String,

    /// Credential used to authenticate
    pub credential: Option<Credential>,

    /// Whether the session treats itself as already privileged
    pub elevated: bool,

    /// Default timeout applied to every command (None = wait forever)
    pub timeout: Option<Duration>,

    /// Maximum accepted command length (None = unlimited)
    pub max_chars: Option<usize>,

    /// How caller-supplied arguments are spliced into commands
    pub argument_quoting: ArgumentQuoting,
}

impl SshConfig {
    /// Create a new SSH configuration with minimal required fields
    pub fn new(host: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            username: username.into(),
            credential: None,
            elevated: false,
            timeout: None,
            max_chars: None,
            argument_quoting: ArgumentQuoting::default(),
        }
    }

    /// Set the SSH port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set password authentication
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.credential = Some(Credential::Password(password.into()));
        self
    }

    /// Set private key authentication (key content, not path)
    pub fn with_private_key(mut self, key: impl Into<String>) -> Self {
        self.credential = Some(Credential::PrivateKey(key.into()));
        self
    }

    /// Mark the session as elevated
    pub fn with_elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// Set the default command timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum command length
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    /// Set the argument quoting policy
    pub fn with_argument_quoting(mut self, quoting: ArgumentQuoting) -> Self {
        self.argument_quoting = quoting;
        self
    }
}
