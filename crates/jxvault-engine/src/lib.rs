//! # jxvault-engine — Validation & Dedup Engine
//!
//! The core of jxvault. On each submission the engine hashes the payload,
//! rejects exact byte-for-byte duplicates against a ledger-backed seen
//! set, validates structural well-formedness for the declared format, and
//! on success persists the payload to a freshly named artifact while
//! appending the digest to the ledger.
//!
//! Control flow: caller → [`Engine::submit`] → hash → membership check →
//! [`validate`](validate::validate) → artifact write → ledger append.
//!
//! The engine is generic over the [`Hasher`](jxvault_core::Hasher) and
//! [`Store`](jxvault_store::Store) seams; production wiring is
//! `Engine<Md5Hasher, DirStore>`, tests run against `MemStore`.

pub mod engine;
pub mod error;
pub mod validate;

pub use engine::{Acceptance, Engine, LEDGER_FILE};
pub use error::EngineError;
