//! # jxvault CLI entry point
//!
//! Parses command-line arguments, initializes tracing from the verbosity
//! flag, and dispatches the single submission to the handler.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jxvault_cli::submit::{run_submit, SubmitArgs};

/// jxvault — validate and vault JSON/XML payloads.
///
/// Accepts one blob of structured text declared as JSON or XML, checks it
/// is well-formed, and — unless it is a byte-for-byte duplicate of
/// previously accepted input — saves it to a new file in the working
/// directory and records its hash in the dedup ledger.
#[derive(Parser, Debug)]
#[command(name = "jxvault", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    submit: SubmitArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // `RUST_LOG` wins when set; otherwise verbosity picks the level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run_submit(&cli.submit) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
