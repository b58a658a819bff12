//! # Submit Handler
//!
//! Builds the production engine wiring (`Md5Hasher` + `DirStore`) and runs
//! one submission. Domain rejections print to stderr and map to exit code
//! 1; storage and initialization failures propagate as hard errors.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use jxvault_core::{Md5Hasher, PayloadFormat};
use jxvault_engine::{Engine, EngineError};
use jxvault_store::DirStore;

/// Arguments for a single payload submission.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub payload: PayloadArg,

    /// Working directory holding the artifacts and the dedup ledger.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

/// The payload and its declared format — exactly one flag must be given.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct PayloadArg {
    /// Parse, validate, and save a JSON payload.
    #[arg(long, value_name = "DATA")]
    pub json: Option<String>,

    /// Parse, validate, and save an XML payload.
    #[arg(long, value_name = "DATA")]
    pub xml: Option<String>,
}

impl PayloadArg {
    /// The declared format and payload, when exactly one flag was given.
    pub fn resolve(&self) -> Option<(PayloadFormat, &str)> {
        match (&self.json, &self.xml) {
            (Some(data), None) => Some((PayloadFormat::Json, data)),
            (None, Some(data)) => Some((PayloadFormat::Xml, data)),
            _ => None,
        }
    }
}

/// Run one submission against the vault in `args.dir`.
pub fn run_submit(args: &SubmitArgs) -> Result<u8> {
    // clap's argument group already enforces this; the bail covers callers
    // constructing SubmitArgs by hand.
    let Some((format, data)) = args.payload.resolve() else {
        bail!("exactly one of --json or --xml is required");
    };

    let store = DirStore::new(&args.dir);
    let mut engine = Engine::open(Md5Hasher, store)
        .with_context(|| format!("opening vault in {}", args.dir.display()))?;

    tracing::debug!(%format, bytes = data.len(), "submitting payload");

    match engine.submit_payload(format, data.as_bytes()) {
        Ok(acceptance) => {
            println!("OK: saved {}", acceptance.artifact);
            println!("  digest: {}", acceptance.digest);
            Ok(0)
        }
        Err(
            err @ (EngineError::InvalidFormat(_)
            | EngineError::DuplicateData(_)
            | EngineError::InvalidData { .. }),
        ) => {
            eprintln!("REJECTED: {err}");
            Ok(1)
        }
        Err(err) => Err(err).context("persisting payload"),
    }
}
