//! # Engine Error Taxonomy
//!
//! One tagged enum for every way a submission can fail, so callers
//! pattern-match on kind instead of string-matching messages. The first
//! four variants are the submission outcomes; [`EngineError::CorruptLedger`]
//! can only arise while opening an engine over an existing ledger.

use thiserror::Error;

use jxvault_core::{DigestParseError, PayloadDigest, PayloadFormat, UnknownFormat};
use jxvault_store::StoreError;

/// A rejected or failed submission.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The format token is not one of the recognized formats.
    ///
    /// Signaled before the payload is hashed — an unrecognized token never
    /// costs a digest computation or any I/O.
    #[error("invalid format: {0}")]
    InvalidFormat(#[from] UnknownFormat),

    /// The payload is a byte-for-byte duplicate of an accepted submission.
    #[error("duplicate payload: digest {0} already accepted")]
    DuplicateData(PayloadDigest),

    /// The format is recognized but the payload fails its grammar.
    #[error("invalid {format} payload: {reason}")]
    InvalidData {
        /// The declared format the payload failed to parse as.
        format: PayloadFormat,
        /// Parser diagnostic, verbatim.
        reason: String,
    },

    /// An artifact write, ledger append, or ledger read failed.
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),

    /// A ledger line did not parse as a digest while hydrating the seen
    /// set. Only reachable from [`Engine::open`](crate::Engine::open).
    #[error("ledger line {line} is not a valid digest: {source}")]
    CorruptLedger {
        /// 1-based line number within the ledger file.
        line: usize,
        /// The digest parse failure.
        #[source]
        source: DigestParseError,
    },
}
