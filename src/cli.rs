//! Subcommands of the pi-remote binary
//!
//! Each subcommand maps onto exactly one [`Session`] operation.

use clap::Subcommand;
use serde::Serialize;

use crate::attributes::AttributeSet;
use crate::commands::{Timelapse, DEFAULT_QUALITY, DEFAULT_TIMELAPSE_PREFIX};
use crate::error::Result;
use crate::session::Session;
use crate::ssh::command::CommandOutput;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Run an arbitrary shell command
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Reboot (sudo unless --elevated)
    Reboot,
    /// Halt the host
    Shutdown,
    /// Run `sudo -i`
    Elevate,
    /// Kill a process by pid
    Kill {
        pid: u32,
        /// Do not prefix with sudo
        #[arg(long)]
        no_sudo: bool,
    },
    /// Kill all processes with a name
    Killall {
        name: String,
        #[arg(long)]
        no_sudo: bool,
    },
    /// Create an empty file
    Touch { file: String },
    /// Change directory (does not persist between invocations)
    Cd { dir: String },
    /// Create a directory
    Mkdir {
        dir: String,
        /// Extra mkdir flag, repeatable
        #[arg(long = "attr", value_name = "KEY[=VALUE]")]
        attrs: Vec<String>,
    },
    /// Rename a directory
    Mv { dir: String, new_name: String },
    /// Remove a directory; refuses non-empty ones without --with-contents
    Rmdir {
        dir: String,
        #[arg(long)]
        with_contents: bool,
    },
    /// Check whether a directory exists
    Exists { dir: String },
    /// Check whether a directory has any entries
    HasContent { dir: String },
    /// List the remote working directory
    Ls,
    /// List processes
    Ps,
    /// Look up the pids of a process name
    Pidof { process: String },
    /// Take a still picture
    Picture { file: String },
    /// Start a raspistill timelapse
    Timelapse {
        /// Milliseconds between frames
        #[arg(long)]
        interval: u64,
        /// Total run time in milliseconds
        #[arg(long)]
        duration: u64,
        #[arg(long, default_value = DEFAULT_TIMELAPSE_PREFIX)]
        prefix: String,
        #[arg(long, default_value_t = DEFAULT_QUALITY)]
        quality: u8,
        /// Do not wait for the run to finish
        #[arg(long)]
        background: bool,
    },
    /// Stop a running timelapse (not implemented)
    StopTimelapse { pid: u32 },
}

/// What an operation produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Output(CommandOutput),
    Flag { result: bool },
}

impl Outcome {
    /// Whether the binary should exit successfully
    pub fn success(&self) -> bool {
        match self {
            Outcome::Output(output) => output.success(),
            Outcome::Flag { .. } => true,
        }
    }
}

impl Operation {
    /// Run this operation on `session`
    pub async fn run(&self, session: &mut Session) -> Result<Outcome> {
        let output = match self {
            Operation::Exec { command } => session.execute(&command.join(" ")).await?,
            Operation::Reboot => session.reboot().await?,
            Operation::Shutdown => session.shutdown().await?,
            Operation::Elevate => session.elevate().await?,
            Operation::Kill { pid, no_sudo } => session.kill_process(*pid, !no_sudo).await?,
            Operation::Killall { name, no_sudo } => session.kill_all(name, !no_sudo).await?,
            Operation::Touch { file } => session.create_file(file).await?,
            Operation::Cd { dir } => session.change_directory(dir).await?,
            Operation::Mkdir { dir, attrs } => {
                let attributes: AttributeSet = attrs.iter().map(|a| parse_attribute(a)).collect();
                session.make_directory(dir, &attributes).await?
            }
            Operation::Mv { dir, new_name } => session.rename_directory(dir, new_name).await?,
            Operation::Rmdir { dir, with_contents } => {
                session.remove_directory(dir, *with_contents).await?
            }
            Operation::Exists { dir } => {
                let result = session.directory_exists(dir).await?;
                return Ok(Outcome::Flag { result });
            }
            Operation::HasContent { dir } => {
                let result = session.directory_has_content(dir).await?;
                return Ok(Outcome::Flag { result });
            }
            Operation::Ls => session.list_directory().await?,
            Operation::Ps => session.list_processes().await?,
            Operation::Pidof { process } => session.find_process_id(process).await?,
            Operation::Picture { file } => session.take_picture(file).await?,
            Operation::Timelapse {
                interval,
                duration,
                prefix,
                quality,
                background,
            } => {
                let timelapse = Timelapse::new(*interval, *duration)
                    .with_prefix(prefix.as_str())
                    .with_quality(*quality)
                    .in_background(*background);
                session.start_timelapse(&timelapse).await?
            }
            Operation::StopTimelapse { pid } => session.stop_timelapse(*pid).await?,
        };

        Ok(Outcome::Output(output))
    }
}

/// Split `KEY=VALUE`; a bare `KEY` gets an empty value
pub fn parse_attribute(raw: &str) -> (String, String) {
    match raw.split_once('=') {
        Some((key, value)) => (key.to_string(), value.to_string()),
        None => (raw.to_string(), String::new()),
    }
}
