//! # Content Hashing
//!
//! The [`Hasher`] seam and its MD5 implementation. Hashing is pure and
//! total: any byte sequence, including empty input, yields a digest.

use md5::{Digest, Md5};

use crate::digest::{PayloadDigest, DIGEST_LEN};

/// Computes the deduplication digest of a payload.
///
/// Implementations must be deterministic — identical byte sequences always
/// yield identical digests — and must accept any input without error.
pub trait Hasher {
    /// Compute the digest of raw payload bytes.
    fn digest(&self, payload: &[u8]) -> PayloadDigest;
}

/// The shipped [`Hasher`]: MD5, a 128-bit digest chosen for speed.
///
/// Collisions are a dedup false-positive, not a security hole, so a fast
/// non-cryptographic-strength hash is acceptable here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Hasher;

impl Hasher for Md5Hasher {
    fn digest(&self, payload: &[u8]) -> PayloadDigest {
        let hash = Md5::digest(payload);
        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&hash);
        PayloadDigest::new(bytes)
    }
}
