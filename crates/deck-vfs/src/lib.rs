//! Content archive access for DATADECK.
//!
//! The shell never touches the filesystem (or the network) directly: every
//! descriptor, manifest, and file body is fetched through the [`Vfs`] trait.
//! That keeps the navigation code testable against an in-memory tree and
//! leaves room for other transports behind the same seam.
//!
//! Paths are archive-relative (`db/music/track.mp3`). Implementations
//! normalize them before lookup; see [`normalize`].

use std::borrow::Cow;

use deck_types::error::{DeckError, Result};

pub mod disk;
pub mod memory;

pub use disk::DiskVfs;
pub use memory::MemoryVfs;

/// Read-mostly access to the content archive.
pub trait Vfs {
    /// Fetch the raw bytes of a file. Missing files are a [`DeckError::Fetch`].
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Store bytes at a path, creating parents as needed. Backends serving
    /// immutable archives may reject this.
    fn write(&mut self, path: &str, data: &[u8]) -> Result<()>;

    /// True when a file exists at the path.
    fn exists(&self, path: &str) -> bool;

    /// Fetch a file and decode it as UTF-8.
    fn read_to_string(&self, path: &str) -> Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| DeckError::Fetch(format!("{path}: invalid UTF-8: {e}")))
    }
}

/// Check whether a path is already in normal form: no leading `/` or `./`,
/// no `//`, no trailing `/`.
fn is_normalized(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with("./") {
        return false;
    }
    if path.ends_with('/') {
        return false;
    }
    !path.contains("//")
}

/// Normalize an archive-relative path: strip leading `/` and `./`, collapse
/// repeated slashes, strip any trailing `/`. Returns the input unchanged
/// (zero-alloc) when already in normal form.
pub fn normalize(path: &str) -> Cow<'_, str> {
    if is_normalized(path) {
        return Cow::Borrowed(path);
    }
    // `/./a` needs two passes, so strip prefixes to a fixed point.
    let mut trimmed = path;
    loop {
        let stripped = trimmed.trim_start_matches("./").trim_start_matches('/');
        if stripped == trimmed {
            break;
        }
        trimmed = stripped;
    }
    let trimmed = trimmed.trim_end_matches('/');
    if is_normalized(trimmed) {
        return Cow::Owned(trimmed.to_string());
    }
    let mut result = String::with_capacity(trimmed.len());
    let mut prev_slash = false;
    for ch in trimmed.chars() {
        if ch == '/' {
            if !prev_slash {
                result.push(ch);
            }
            prev_slash = true;
        } else {
            result.push(ch);
            prev_slash = false;
        }
    }
    Cow::Owned(result)
}

/// Join a folder and a file name into an archive-relative path.
pub fn join(folder: &str, name: &str) -> String {
    let folder = normalize(folder);
    if folder.is_empty() {
        normalize(name).into_owned()
    } else {
        normalize(&format!("{folder}/{name}")).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_path_is_borrowed() {
        let p = normalize("db/music/track.mp3");
        assert!(matches!(p, Cow::Borrowed(_)));
        assert_eq!(p, "db/music/track.mp3");
    }

    #[test]
    fn leading_slash_stripped() {
        assert_eq!(normalize("/db/db.json"), "db/db.json");
    }

    #[test]
    fn leading_dot_slash_stripped() {
        assert_eq!(normalize("./db/db.json"), "db/db.json");
    }

    #[test]
    fn repeated_slashes_collapsed() {
        assert_eq!(normalize("db//music///a.mp3"), "db/music/a.mp3");
    }

    #[test]
    fn trailing_slash_stripped() {
        assert_eq!(normalize("db/music/"), "db/music");
    }

    #[test]
    fn join_folder_and_name() {
        assert_eq!(join("db/texts", "a.txt"), "db/texts/a.txt");
        assert_eq!(join("db/texts/", "a.txt"), "db/texts/a.txt");
        assert_eq!(join("", "index.html"), "index.html");
    }

    #[test]
    fn read_to_string_rejects_invalid_utf8() {
        let mut vfs = MemoryVfs::new();
        vfs.write("bin/blob", &[0xFF, 0xFE, 0x00]).unwrap();
        assert!(vfs.read_to_string("bin/blob").is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalize_is_idempotent(path in "[a-z0-9./]{0,24}") {
                let once = normalize(&path).into_owned();
                let twice = normalize(&once).into_owned();
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn normalized_paths_have_no_edge_slashes(path in "[a-z./]{0,24}") {
                let p = normalize(&path).into_owned();
                prop_assert!(!p.starts_with('/'));
                prop_assert!(!p.ends_with('/'));
                prop_assert!(!p.contains("//"));
            }
        }
    }
}
