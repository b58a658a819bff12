//! # Validation & Dedup Engine
//!
//! [`Engine`] orchestrates one submission at a time: hash, duplicate
//! check, well-formedness validation, artifact write, ledger append. The
//! ordering is part of the contract:
//!
//! - The digest is computed and checked against the seen set *before*
//!   validation, so a payload that has already been accepted is rejected
//!   without paying for a parse — even if its declared format this time
//!   around would not validate.
//! - The ledger append happens *before* the in-memory insert, so a failed
//!   append leaves both the ledger and the seen set agreeing the payload
//!   was never accepted, and an identical retry goes through.
//!
//! ## Ownership
//!
//! The engine exclusively owns its seen set; it is a field, never a
//! process-wide singleton. `submit` takes `&mut self`, so a concurrent
//! caller must wrap the engine in a lock — that keeps the whole
//! hash-to-append sequence atomic with respect to other submissions.

use std::collections::HashSet;

use jxvault_core::{Hasher, PayloadDigest, PayloadFormat};
use jxvault_store::Store;

use crate::error::EngineError;
use crate::validate;

/// Well-known name of the deduplication ledger file.
///
/// One accepted digest per line, hex-encoded, newline-terminated,
/// append-only. The set of lines reconstructs the seen set exactly.
pub const LEDGER_FILE: &str = "hashes.dat";

/// A successfully persisted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    /// Name of the artifact file holding the payload bytes.
    pub artifact: String,
    /// Digest recorded in the ledger for this payload.
    pub digest: PayloadDigest,
}

/// The validation & dedup orchestrator.
///
/// Construct with [`Engine::open`], which hydrates the seen set from the
/// ledger (creating an empty ledger on first run). Each successful
/// [`submit`](Engine::submit) writes one artifact file and appends one
/// ledger line; a digest transitions `unseen → seen` only on full success
/// and never transitions back.
pub struct Engine<H, S> {
    hasher: H,
    store: S,
    seen: HashSet<PayloadDigest>,
}

impl<H: Hasher, S: Store> Engine<H, S> {
    /// Open an engine over a store, replaying the ledger into the seen set.
    ///
    /// If the ledger does not exist it is created empty. A ledger line
    /// that does not parse as a digest fails the open with
    /// [`EngineError::CorruptLedger`]; an I/O failure here is fatal to the
    /// caller — no submission is possible without a hydrated seen set.
    pub fn open(hasher: H, store: S) -> Result<Self, EngineError> {
        let mut seen = HashSet::new();
        if store.exists(LEDGER_FILE) {
            for (idx, line) in store.read_lines(LEDGER_FILE)?.iter().enumerate() {
                let digest = PayloadDigest::from_hex(line).map_err(|source| {
                    EngineError::CorruptLedger {
                        line: idx + 1,
                        source,
                    }
                })?;
                seen.insert(digest);
            }
        } else {
            store.create(LEDGER_FILE)?;
        }
        Ok(Self {
            hasher,
            store,
            seen,
        })
    }

    /// Submit a payload under a format token (`"json"` or `"xml"`).
    ///
    /// The token is parsed before anything else — an unrecognized format
    /// is rejected without hashing the payload or touching the store.
    pub fn submit(&mut self, format: &str, payload: &[u8]) -> Result<Acceptance, EngineError> {
        let format: PayloadFormat = format.parse()?;
        self.submit_payload(format, payload)
    }

    /// Submit a payload under an already-parsed format.
    ///
    /// On success the payload bytes are persisted verbatim to a freshly
    /// named artifact and the digest is appended to the ledger. On any
    /// error the seen set is unchanged.
    pub fn submit_payload(
        &mut self,
        format: PayloadFormat,
        payload: &[u8],
    ) -> Result<Acceptance, EngineError> {
        // Hash before validating: a known digest is rejected without
        // paying for a parse, whatever format it was declared as.
        let digest = self.hasher.digest(payload);
        if self.seen.contains(&digest) {
            return Err(EngineError::DuplicateData(digest));
        }

        validate::validate(format, payload)?;

        // Artifact index is the count of prior acceptances.
        let artifact = format!("{}.{}", self.seen.len(), format.extension());
        self.store.create(&artifact)?;
        self.store.append(&artifact, payload)?;

        // Ledger before seen set: if this append fails, no trace of the
        // digest remains anywhere and an identical retry is accepted.
        let mut line = digest.to_hex();
        line.push('\n');
        self.store.append(LEDGER_FILE, line.as_bytes())?;
        self.seen.insert(digest);

        Ok(Acceptance { artifact, digest })
    }

    /// Number of payloads accepted so far (including replayed ledger
    /// entries). Also the index the next artifact will be named with.
    pub fn accepted(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use jxvault_core::Md5Hasher;
    use jxvault_store::{MemStore, StoreError};

    fn open(store: &MemStore) -> Engine<Md5Hasher, &MemStore> {
        Engine::open(Md5Hasher, store).unwrap()
    }

    #[test]
    fn open_creates_missing_ledger() {
        let store = MemStore::new();
        let engine = open(&store);

        assert_eq!(engine.accepted(), 0);
        assert!(store.exists(LEDGER_FILE));
        assert_eq!(store.contents(LEDGER_FILE).unwrap(), b"");
    }

    #[test]
    fn open_replays_ledger_exactly() {
        let h1 = Md5Hasher.digest(br#"{"a":1}"#);
        let h2 = Md5Hasher.digest(br#"{"b":2}"#);

        let store = MemStore::new();
        store
            .append(LEDGER_FILE, format!("{h1}\n{h2}\n").as_bytes())
            .unwrap();

        let mut engine = open(&store);
        assert_eq!(engine.accepted(), 2);

        // Replayed digests are live duplicates...
        match engine.submit("json", br#"{"a":1}"#) {
            Err(EngineError::DuplicateData(d)) => assert_eq!(d, h1),
            other => panic!("expected DuplicateData, got {other:?}"),
        }
        // ...and nothing beyond the ledger is seen.
        engine.submit("json", br#"{"c":3}"#).unwrap();
    }

    #[test]
    fn open_rejects_corrupt_ledger_line() {
        let store = MemStore::new();
        store.append(LEDGER_FILE, b"not-a-digest\n").unwrap();

        match Engine::open(Md5Hasher, &store) {
            Err(EngineError::CorruptLedger { line: 1, .. }) => {}
            other => panic!("expected CorruptLedger, got {:?}", other.err()),
        }
    }

    #[test]
    fn accepts_and_persists_json() {
        let store = MemStore::new();
        let mut engine = open(&store);

        let acceptance = engine.submit("json", br#"{"a":1}"#).unwrap();
        assert_eq!(acceptance.artifact, "0.json");
        assert_eq!(acceptance.digest.to_hex(), "bb6cb5c68df4652941caf652a366f2d8");

        assert_eq!(store.contents("0.json").unwrap(), br#"{"a":1}"#);
        assert_eq!(
            store.contents(LEDGER_FILE).unwrap(),
            b"bb6cb5c68df4652941caf652a366f2d8\n"
        );
        assert_eq!(engine.accepted(), 1);
    }

    #[test]
    fn duplicate_submission_short_circuits() {
        let store = MemStore::new();
        let mut engine = open(&store);

        engine.submit("json", br#"{"a":1}"#).unwrap();
        let before = store.file_names();

        match engine.submit("json", br#"{"a":1}"#) {
            Err(EngineError::DuplicateData(_)) => {}
            other => panic!("expected DuplicateData, got {other:?}"),
        }
        assert_eq!(store.file_names(), before);
        assert_eq!(engine.accepted(), 1);
    }

    #[test]
    fn dedup_is_payload_keyed_not_format_keyed() {
        let store = MemStore::new();
        let mut engine = open(&store);

        engine.submit("json", br#"{"a":1}"#).unwrap();
        // Same bytes, different declared format: still a duplicate.
        match engine.submit("xml", br#"{"a":1}"#) {
            Err(EngineError::DuplicateData(_)) => {}
            other => panic!("expected DuplicateData, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_wins_over_validation() {
        // A payload that is both a duplicate and malformed for its declared
        // format reports DuplicateData: the hash check precedes the parse.
        let malformed = br#"<a><b>1</b><a>"#;
        let store = MemStore::new();
        store
            .append(
                LEDGER_FILE,
                format!("{}\n", Md5Hasher.digest(malformed)).as_bytes(),
            )
            .unwrap();

        let mut engine = open(&store);
        match engine.submit("xml", malformed) {
            Err(EngineError::DuplicateData(_)) => {}
            other => panic!("expected DuplicateData, got {other:?}"),
        }
    }

    #[test]
    fn invalid_payload_leaves_no_trace() {
        let store = MemStore::new();
        let mut engine = open(&store);

        match engine.submit("xml", br#"<a><b>1</b><a>"#) {
            Err(EngineError::InvalidData { .. }) => {}
            other => panic!("expected InvalidData, got {other:?}"),
        }
        assert_eq!(engine.accepted(), 0);
        assert_eq!(store.file_names(), vec![LEDGER_FILE.to_string()]);
        assert_eq!(store.contents(LEDGER_FILE).unwrap(), b"");
    }

    #[test]
    fn unknown_format_token_rejected_before_any_work() {
        let store = MemStore::new();
        let mut engine = open(&store);

        match engine.submit("yaml", b"a: 1") {
            Err(EngineError::InvalidFormat(_)) => {}
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
        assert_eq!(store.file_names(), vec![LEDGER_FILE.to_string()]);
    }

    #[test]
    fn artifact_names_increase_with_acceptance_order() {
        let store = MemStore::new();
        let mut engine = open(&store);

        let a0 = engine.submit("json", br#"{"a":1}"#).unwrap();
        let a1 = engine.submit("xml", br#"<a>1</a>"#).unwrap();
        let a2 = engine.submit("json", br#"{"b":2}"#).unwrap();

        assert_eq!(
            [a0.artifact, a1.artifact, a2.artifact],
            ["0.json", "1.xml", "2.json"]
        );
        assert_eq!(engine.accepted(), 3);
    }

    /// Wraps a [`MemStore`] with switchable failure injection.
    struct FailStore {
        inner: MemStore,
        fail_creates: Cell<bool>,
        fail_ledger_appends: Cell<bool>,
    }

    impl FailStore {
        fn new() -> Self {
            Self {
                inner: MemStore::new(),
                fail_creates: Cell::new(false),
                fail_ledger_appends: Cell::new(false),
            }
        }

        fn denied(op: &'static str, name: &str) -> StoreError {
            StoreError::Io {
                op,
                name: name.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "injected"),
            }
        }
    }

    impl Store for FailStore {
        fn exists(&self, name: &str) -> bool {
            self.inner.exists(name)
        }

        fn create(&self, name: &str) -> Result<(), StoreError> {
            if self.fail_creates.get() {
                return Err(Self::denied("create", name));
            }
            self.inner.create(name)
        }

        fn append(&self, name: &str, content: &[u8]) -> Result<(), StoreError> {
            if self.fail_ledger_appends.get() && name == LEDGER_FILE {
                return Err(Self::denied("append", name));
            }
            self.inner.append(name, content)
        }

        fn read_lines(&self, name: &str) -> Result<Vec<String>, StoreError> {
            self.inner.read_lines(name)
        }
    }

    #[test]
    fn artifact_write_failure_commits_nothing() {
        let store = FailStore::new();
        let mut engine = Engine::open(Md5Hasher, &store).unwrap();

        store.fail_creates.set(true);
        match engine.submit("json", br#"{"a":1}"#) {
            Err(EngineError::Storage(_)) => {}
            other => panic!("expected Storage, got {other:?}"),
        }
        assert_eq!(engine.accepted(), 0);
        assert_eq!(store.inner.contents(LEDGER_FILE).unwrap(), b"");

        // Identical retry after the failure clears is accepted, not
        // rejected as a duplicate.
        store.fail_creates.set(false);
        let acceptance = engine.submit("json", br#"{"a":1}"#).unwrap();
        assert_eq!(acceptance.artifact, "0.json");
    }

    #[test]
    fn ledger_append_failure_commits_nothing() {
        let store = FailStore::new();
        let mut engine = Engine::open(Md5Hasher, &store).unwrap();

        store.fail_ledger_appends.set(true);
        match engine.submit("json", br#"{"a":1}"#) {
            Err(EngineError::Storage(_)) => {}
            other => panic!("expected Storage, got {other:?}"),
        }
        // The seen set did not advance past the ledger.
        assert_eq!(engine.accepted(), 0);
        assert_eq!(store.inner.contents(LEDGER_FILE).unwrap(), b"");

        store.fail_ledger_appends.set(false);
        let acceptance = engine.submit("json", br#"{"a":1}"#).unwrap();
        // Same index is reused; create() truncated the partial artifact.
        assert_eq!(acceptance.artifact, "0.json");
        assert_eq!(store.inner.contents("0.json").unwrap(), br#"{"a":1}"#);
        assert_eq!(engine.accepted(), 1);
    }
}
