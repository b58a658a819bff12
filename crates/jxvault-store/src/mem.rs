//! # In-Memory Store
//!
//! [`MemStore`] keeps files in a map behind a mutex. It exists so engine
//! tests can observe exactly which files were written without touching the
//! filesystem; it is not intended for production use.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::{Store, StoreError};

/// An in-memory [`Store`] double.
#[derive(Debug, Default)]
pub struct MemStore {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current content of a file, if it exists.
    pub fn contents(&self, name: &str) -> Option<Vec<u8>> {
        self.lock().get(name).cloned()
    }

    /// All file names present, in sorted order.
    pub fn file_names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        // A poisoned lock only means a test thread panicked mid-write;
        // the map itself is still usable.
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn not_found(op: &'static str, name: &str) -> StoreError {
        StoreError::io(
            op,
            name,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        )
    }
}

impl Store for MemStore {
    fn exists(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    fn create(&self, name: &str) -> Result<(), StoreError> {
        self.lock().insert(name.to_string(), Vec::new());
        Ok(())
    }

    fn append(&self, name: &str, content: &[u8]) -> Result<(), StoreError> {
        self.lock()
            .entry(name.to_string())
            .or_default()
            .extend_from_slice(content);
        Ok(())
    }

    fn read_lines(&self, name: &str) -> Result<Vec<String>, StoreError> {
        let files = self.lock();
        let bytes = files.get(name).ok_or_else(|| Self::not_found("read", name))?;
        let text = std::str::from_utf8(bytes).map_err(|e| {
            StoreError::io(
                "read",
                name,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;
        Ok(text.lines().map(str::to_string).collect())
    }
}
