//! Disk-backed archive rooted at a directory.
//!
//! Archive-relative paths resolve under the root. Path traversal out of the
//! root (`..` components) is rejected rather than resolved.

use std::fs;
use std::path::{Component, Path, PathBuf};

use deck_types::error::{DeckError, Result};

use crate::{normalize, Vfs};

/// A content archive served from a directory on disk.
#[derive(Debug)]
pub struct DiskVfs {
    root: PathBuf,
}

impl DiskVfs {
    /// Serve the archive rooted at `root`. The directory does not need to
    /// exist yet; reads against a missing root simply fail.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let rel = normalize(path);
        let rel_path = Path::new(rel.as_ref());
        for comp in rel_path.components() {
            match comp {
                Component::Normal(_) => {},
                _ => {
                    return Err(DeckError::Fetch(format!("{path}: escapes archive root")));
                },
            }
        }
        Ok(self.root.join(rel_path))
    }
}

impl Vfs for DiskVfs {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.resolve(path)?;
        fs::read(&full).map_err(|e| DeckError::Fetch(format!("{path}: {e}")))
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, data)?;
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }
}
