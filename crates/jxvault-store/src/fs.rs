//! # File-Backed Store
//!
//! [`DirStore`] resolves every name against a single root directory and
//! creates that directory on the first write. Appends open the target with
//! `O_APPEND` semantics so ledger lines from one process land whole.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Store, StoreError};

/// A [`Store`] backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory does not need to exist yet — it is created on the
    /// first write operation.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The working directory this store resolves names against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn ensure_root(&self, op: &'static str, name: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::io(op, name, e))
    }
}

impl Store for DirStore {
    fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    fn create(&self, name: &str) -> Result<(), StoreError> {
        self.ensure_root("create", name)?;
        fs::File::create(self.path(name)).map_err(|e| StoreError::io("create", name, e))?;
        Ok(())
    }

    fn append(&self, name: &str, content: &[u8]) -> Result<(), StoreError> {
        self.ensure_root("append", name)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(name))
            .map_err(|e| StoreError::io("append", name, e))?;
        file.write_all(content)
            .map_err(|e| StoreError::io("append", name, e))
    }

    fn read_lines(&self, name: &str) -> Result<Vec<String>, StoreError> {
        let text = fs::read_to_string(self.path(name))
            .map_err(|e| StoreError::io("read", name, e))?;
        Ok(text.lines().map(str::to_string).collect())
    }
}
