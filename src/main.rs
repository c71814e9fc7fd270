//! pi-remote - Entry point
//!
//! Parses CLI arguments, opens one SSH session, runs the requested operation
//! and prints what the remote shell returned.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pi_remote::config::{Args, Config};
use pi_remote::error::Result;
use pi_remote::{Outcome, Session};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr; stdout carries the remote output
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_args(args)?;

    info!("pi-remote v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        "Connecting to {}@{}:{}",
        config.user, config.host, config.port
    );

    let ssh_config = config.ssh_config().await?;
    let mut session = Session::open(&ssh_config).await?;

    let result = config.operation.run(&mut session).await;
    session.close().await;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{}", e);
            return Err(e);
        }
    };

    print_outcome(&outcome, config.json);

    Ok(if outcome.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_outcome(outcome: &Outcome, json: bool) {
    if json {
        match serde_json::to_string_pretty(outcome) {
            Ok(text) => println!("{}", text),
            Err(e) => error!("Failed to serialize output: {}", e),
        }
        return;
    }

    match outcome {
        Outcome::Output(output) => {
            print!("{}", output.stdout);
            if !output.stderr.is_empty() {
                eprint!("{}", output.stderr);
            }
        }
        Outcome::Flag { result } => println!("{}", result),
    }
}
