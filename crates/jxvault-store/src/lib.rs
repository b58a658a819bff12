//! # jxvault-store — Persistence Seam
//!
//! Abstracts the durable medium behind the [`Store`] trait: existence
//! checks, file creation, append-writes, and line-oriented reads. The
//! store is the only component in the workspace permitted to perform
//! file-system mutation; everything above it goes through this trait.
//!
//! Two implementations ship:
//!
//! - [`DirStore`] — file-backed, rooted at a working directory.
//! - [`MemStore`] — an in-memory double for tests.
//!
//! All operations are synchronous and blocking. Names are plain file
//! names resolved relative to the store's single working directory;
//! no concurrent-writer coordination is provided.

use thiserror::Error;

pub mod fs;
pub mod mem;

pub use fs::DirStore;
pub use mem::MemStore;

/// Durable storage operations consumed by the engine.
pub trait Store {
    /// Whether a file with this name exists in the working directory.
    fn exists(&self, name: &str) -> bool;

    /// Create an empty file, truncating any existing content.
    fn create(&self, name: &str) -> Result<(), StoreError>;

    /// Append bytes to a file, creating it first if absent.
    fn append(&self, name: &str, content: &[u8]) -> Result<(), StoreError>;

    /// Read a file as an ordered sequence of lines.
    fn read_lines(&self, name: &str) -> Result<Vec<String>, StoreError>;
}

/// A failed storage operation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying I/O operation failed.
    #[error("{op} {name:?}: {source}")]
    Io {
        /// Which operation failed ("create", "append", "read").
        op: &'static str,
        /// The file name the operation targeted.
        name: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(op: &'static str, name: &str, source: std::io::Error) -> Self {
        Self::Io {
            op,
            name: name.to_string(),
            source,
        }
    }
}

// A shared reference to a store is itself a store; the trait only needs
// `&self`. Lets a caller keep inspecting a store it lent to an engine.
impl<S: Store + ?Sized> Store for &S {
    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }

    fn create(&self, name: &str) -> Result<(), StoreError> {
        (**self).create(name)
    }

    fn append(&self, name: &str, content: &[u8]) -> Result<(), StoreError> {
        (**self).append(name, content)
    }

    fn read_lines(&self, name: &str) -> Result<Vec<String>, StoreError> {
        (**self).read_lines(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display_carries_context() {
        let err = StoreError::io(
            "append",
            "hashes.dat",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = format!("{err}");
        assert!(msg.contains("append"));
        assert!(msg.contains("hashes.dat"));
        assert!(msg.contains("denied"));
    }
}
