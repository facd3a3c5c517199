//! Storage backend trait and implementations.
//!
//! Corpus data is read once per session through a `StorageBackend`, so the
//! engine never touches the filesystem itself.

pub mod local;

use std::path::Path;

use crate::corpus::{Corpus, SuraNames, Translator};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Failed to read: {0}")]
    ReadError(String),

    #[error("Failed to parse: {0}")]
    ParseError(String),
}

/// Trait for storage backends holding translator corpora.
pub trait StorageBackend: Send + Sync {
    /// Read every record of one translator.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the corpus cannot be read or parsed.
    fn read_corpus(&self, translator: &Translator) -> Result<Corpus, StorageError>;

    /// Read sura display names, if this backend has them.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the names exist but cannot be read or parsed.
    fn read_sura_names(&self) -> Result<Option<SuraNames>, StorageError>;

    /// Check if a translator's corpus exists in storage.
    fn exists(&self, translator: &Translator) -> bool;

    /// Get the root path/identifier for this storage backend.
    fn root(&self) -> &Path;
}
