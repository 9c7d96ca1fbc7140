//! In-memory archive backend.
//!
//! The whole tree lives in a `BTreeMap<String, Vec<u8>>` keyed by normalized
//! archive-relative paths. Used by unit tests and the bundled demo content.

use std::collections::BTreeMap;

use deck_types::error::{DeckError, Result};

use crate::{normalize, Vfs};

/// A fully in-memory content archive.
#[derive(Debug, Default)]
pub struct MemoryVfs {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryVfs {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for seeding text content.
    pub fn insert_str(&mut self, path: &str, text: &str) {
        self.files
            .insert(normalize(path).into_owned(), text.as_bytes().to_vec());
    }

    /// Number of files in the archive.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when the archive holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths of all files under a folder, in lexicographic order.
    pub fn list(&self, folder: &str) -> Vec<String> {
        let folder = normalize(folder);
        let prefix = if folder.is_empty() {
            String::new()
        } else {
            format!("{folder}/")
        };
        self.files
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(k, _)| k.clone())
            .collect()
    }
}

impl Vfs for MemoryVfs {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let path = normalize(path);
        self.files
            .get(path.as_ref())
            .cloned()
            .ok_or_else(|| DeckError::Fetch(format!("{path}: not found")))
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.files.insert(normalize(path).into_owned(), data.to_vec());
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(normalize(path).as_ref())
    }
}
