//! # Payload Digest — Deduplication Keys
//!
//! Defines [`PayloadDigest`], the fixed-size 128-bit digest that keys the
//! deduplication ledger. Two submissions with identical payload bytes
//! produce identical digests regardless of their declared format.
//!
//! ## Encoding Invariant
//!
//! The ledger is line-oriented, so digests are persisted as their 32-char
//! lowercase hex rendering — raw digest bytes may contain `0x0A` and would
//! break line framing. [`PayloadDigest::to_hex`] and
//! [`PayloadDigest::from_hex`] are the only codec between the two shapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of bytes in a payload digest.
pub const DIGEST_LEN: usize = 16;

/// A 128-bit content digest used as a deduplication key.
///
/// Produced by a [`Hasher`](crate::Hasher) over the raw payload bytes.
/// Deterministic: identical byte sequences always yield identical digests.
/// The residual collision probability of a 128-bit hash is an accepted
/// trade-off; this value is a dedup key, not an integrity proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayloadDigest([u8; DIGEST_LEN]);

impl PayloadDigest {
    /// Wrap raw digest bytes.
    ///
    /// Prefer [`Hasher::digest`](crate::Hasher::digest) for computing
    /// digests from payloads.
    pub fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw 16-byte digest value.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Render the digest as a lowercase hex string (32 chars).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a digest from its hex rendering.
    ///
    /// Accepts exactly 32 hex characters (case-insensitive). This is the
    /// decode half of the ledger line codec.
    pub fn from_hex(s: &str) -> Result<Self, DigestParseError> {
        // Hex-digit check first: it also rules out non-ASCII input, so the
        // byte-indexed slicing below cannot split a character.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DigestParseError::NonHex);
        }
        if s.len() != DIGEST_LEN * 2 {
            return Err(DigestParseError::Length(s.len()));
        }
        let mut bytes = [0u8; DIGEST_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &s[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|_| DigestParseError::NonHex)?;
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for PayloadDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Error parsing a digest from its hex rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestParseError {
    /// The input is not exactly 32 hex characters long.
    #[error("digest must be 32 hex characters, got {0}")]
    Length(usize),

    /// The input contains a character outside `[0-9a-fA-F]`.
    #[error("digest contains non-hex characters")]
    NonHex,
}
