//! Local filesystem storage backend.

use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::{Corpus, SuraNames, Translator, parse_sura_names};
use crate::storage::{StorageBackend, StorageError};

/// File holding sura display names within a data directory.
pub const SURA_NAMES_FILE: &str = "sura-names.json";

/// Storage backend reading `<root>/<key>.json` corpus files.
pub struct LocalStorageBackend {
    root: PathBuf,
}

impl LocalStorageBackend {
    /// Create a new local storage backend rooted at the given path.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn corpus_path(&self, translator: &Translator) -> PathBuf {
        self.root.join(format!("{}.json", translator.key))
    }

    fn read(path: &Path) -> Result<String, StorageError> {
        if !path.exists() {
            return Err(StorageError::NotFound(path.display().to_string()));
        }

        fs::read_to_string(path)
            .map_err(|e| StorageError::ReadError(format!("{}: {e}", path.display())))
    }
}

impl StorageBackend for LocalStorageBackend {
    fn read_corpus(&self, translator: &Translator) -> Result<Corpus, StorageError> {
        let path = self.corpus_path(translator);
        let contents = Self::read(&path)?;

        Corpus::from_json(translator, &contents)
            .map_err(|e| StorageError::ParseError(format!("{}: {e}", path.display())))
    }

    fn read_sura_names(&self) -> Result<Option<SuraNames>, StorageError> {
        let path = self.root.join(SURA_NAMES_FILE);

        if !path.exists() {
            return Ok(None);
        }

        let contents = Self::read(&path)?;
        parse_sura_names(&contents)
            .map(Some)
            .map_err(|e| StorageError::ParseError(format!("{}: {e}", path.display())))
    }

    fn exists(&self, translator: &Translator) -> bool {
        self.corpus_path(translator).exists()
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
