//! Configuration and CLI argument parsing for the pi-remote binary

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::cli::Operation;
use crate::error::{PiRemoteError, Result};
use crate::ssh::{ArgumentQuoting, SshConfig};

/// Default max characters for a command (None = unlimited)
pub const DEFAULT_MAX_CHARS: Option<usize> = Some(1000);

/// pi-remote CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "pi-remote")]
#[command(version)]
#[command(about = "Run canned commands on a Raspberry Pi over SSH")]
pub struct Args {
    /// SSH host to connect to
    #[arg(long, env = "PI_REMOTE_HOST")]
    pub host: String,

    /// SSH port
    #[arg(long, default_value = "22", env = "PI_REMOTE_PORT")]
    pub port: u16,

    /// SSH username
    #[arg(long, env = "PI_REMOTE_USER")]
    pub user: String,

    /// SSH password (alternative to key)
    #[arg(long, env = "PI_REMOTE_PASSWORD")]
    pub password: Option<String>,

    /// Path to SSH private key file (alternative to password)
    #[arg(long, env = "PI_REMOTE_KEY")]
    pub key: Option<PathBuf>,

    /// Treat the session as already privileged
    #[arg(long, default_value = "false", env = "PI_REMOTE_ELEVATED")]
    pub elevated: bool,

    /// Command timeout in milliseconds (0 = wait forever)
    #[arg(long, default_value = "0", env = "PI_REMOTE_TIMEOUT")]
    pub timeout: u64,

    /// Maximum characters for command length.
    /// Use "none", "0", or negative value to disable limit.
    /// Default: 1000
    #[arg(long = "max-chars", env = "PI_REMOTE_MAX_CHARS")]
    pub max_chars: Option<String>,

    /// Single-quote names and paths before splicing them into commands
    #[arg(long, default_value = "false", env = "PI_REMOTE_QUOTE_ARGUMENTS")]
    pub quote_arguments: bool,

    /// Print results as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub operation: Operation,
}

/// Parsed and validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub key: Option<PathBuf>,
    pub elevated: bool,

    /// Command timeout in milliseconds (None = wait forever)
    pub timeout_ms: Option<u64>,

    /// Maximum command length (None = unlimited)
    pub max_chars: Option<usize>,

    pub argument_quoting: ArgumentQuoting,
    pub json: bool,
    pub operation: Operation,
}

impl Config {
    /// Create Config from CLI Args
    pub fn from_args(args: Args) -> Result<Self> {
        validate_args(&args)?;

        let max_chars = parse_max_chars(args.max_chars.as_deref());
        let argument_quoting = if args.quote_arguments {
            ArgumentQuoting::Quoted
        } else {
            ArgumentQuoting::Verbatim
        };

        Ok(Config {
            host: args.host,
            port: args.port,
            user: args.user,
            password: sanitize_password(args.password),
            key: args.key,
            elevated: args.elevated,
            timeout_ms: (args.timeout > 0).then_some(args.timeout),
            max_chars,
            argument_quoting,
            json: args.json,
            operation: args.operation,
        })
    }

    /// Build the session configuration, reading the key file if one was given
    pub async fn ssh_config(&self) -> Result<SshConfig> {
        let mut ssh_config = SshConfig::new(&self.host, &self.user)
            .with_port(self.port)
            .with_elevated(self.elevated)
            .with_argument_quoting(self.argument_quoting);

        if let Some(ref password) = self.password {
            ssh_config = ssh_config.with_password(password);
        }

        if let Some(ref key_path) = self.key {
            let key_content = tokio::fs::read_to_string(key_path).await?;
            ssh_config = ssh_config.with_private_key(key_content);
        }

        if let Some(ms) = self.timeout_ms {
            ssh_config = ssh_config.with_timeout(Duration::from_millis(ms));
        }

        if let Some(max) = self.max_chars {
            ssh_config = ssh_config.with_max_chars(max);
        }

        Ok(ssh_config)
    }
}

/// Validate CLI arguments
fn validate_args(args: &Args) -> Result<()> {
    let mut errors = Vec::new();

    if args.host.is_empty() {
        errors.push("Missing required --host".to_string());
    }

    if args.user.is_empty() {
        errors.push("Missing required --user".to_string());
    }

    if args.password.is_none() && args.key.is_none() {
        errors.push("Must provide either --password or --key".to_string());
    }

    if let Some(ref key_path) = args.key {
        if !key_path.exists() {
            errors.push(format!("SSH key file not found: {}", key_path.display()));
        }
    }

    if !errors.is_empty() {
        return Err(PiRemoteError::config(errors.join("\n")));
    }

    Ok(())
}

/// Parse max_chars argument
///
/// - "none" (case-insensitive) → None (unlimited)
/// - "0" or negative → None (unlimited)
/// - positive integer → Some(value)
/// - None (not provided) or unparsable → DEFAULT_MAX_CHARS
pub fn parse_max_chars(value: Option<&str>) -> Option<usize> {
    match value {
        None => DEFAULT_MAX_CHARS,
        Some(s) if s.eq_ignore_ascii_case("none") => None,
        Some(s) => match s.parse::<i64>() {
            Ok(n) if n <= 0 => None,
            Ok(n) => Some(n as usize),
            Err(_) => DEFAULT_MAX_CHARS,
        },
    }
}

/// Sanitize password: return None if empty
fn sanitize_password(password: Option<String>) -> Option<String> {
    password.filter(|p| !p.is_empty())
}
