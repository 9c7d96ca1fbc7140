//! Folder manifest autoload.
//!
//! Descriptors with `autoload` and a `folder` get their item list built
//! from a manifest fetched under that folder: item 0 (the return entry) is
//! preserved and discovered filenames are appended as leaf items. A failed
//! manifest fetch falls back to the descriptor's declared items so the menu
//! never blocks.

use deck_types::error::Result;
use deck_vfs::Vfs;

use crate::descriptor::{MenuDescriptor, MenuItem};

/// Manifest path for a folder: `<base>/<folder>/<manifest-name>`.
pub fn manifest_path(base: &str, folder: &str, manifest_name: &str) -> String {
    deck_vfs::join(&deck_vfs::join(base, folder), manifest_name)
}

/// Merge manifest filenames into an item list, preserving item 0.
pub fn merge(items: &[MenuItem], files: Vec<String>) -> Vec<MenuItem> {
    let mut merged: Vec<MenuItem> = items.iter().take(1).cloned().collect();
    merged.extend(files.into_iter().map(MenuItem::leaf));
    merged
}

fn fetch_manifest(vfs: &dyn Vfs, path: &str) -> Result<Vec<String>> {
    let text = vfs.read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Resolve the effective item list for a descriptor. Non-autoload
/// descriptors pass through unchanged; manifest failures are logged and
/// fall back to the declared items.
pub fn resolve_items(
    vfs: &dyn Vfs,
    base: &str,
    manifest_name: &str,
    descriptor: &MenuDescriptor,
) -> Vec<MenuItem> {
    let Some(folder) = descriptor.folder.as_deref().filter(|_| descriptor.autoload) else {
        return descriptor.items.clone();
    };
    let path = manifest_path(base, folder, manifest_name);
    match fetch_manifest(vfs, &path) {
        Ok(files) => merge(&descriptor.items, files),
        Err(e) => {
            log::warn!("autoload failed for {path}: {e}");
            descriptor.items.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_vfs::MemoryVfs;

    fn autoload_descriptor() -> MenuDescriptor {
        MenuDescriptor::parse(
            r#"{
                "items": [{"label": "Back", "type": "return"}],
                "variant": "scroll",
                "filetype": "audio",
                "autoload": true,
                "folder": "music"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn manifest_path_layout() {
        assert_eq!(manifest_path("db", "music", "files.json"), "db/music/files.json");
    }

    #[test]
    fn merge_preserves_return_item() {
        let d = autoload_descriptor();
        let merged = merge(&d.items, vec!["x.mp3".into(), "y.mp3".into()]);
        assert_eq!(merged.len(), 3);
        assert!(merged[0].is_return());
        assert_eq!(merged[1].label, "x.mp3");
        assert_eq!(merged[2].label, "y.mp3");
        assert_eq!(merged[1].kind, None);
    }

    #[test]
    fn resolve_appends_manifest_files() {
        let mut vfs = MemoryVfs::new();
        vfs.insert_str("db/music/files.json", r#"["x.mp3","y.mp3"]"#);
        let d = autoload_descriptor();
        let items = resolve_items(&vfs, "db", "files.json", &d);
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Back", "x.mp3", "y.mp3"]);
    }

    #[test]
    fn resolve_falls_back_on_missing_manifest() {
        let vfs = MemoryVfs::new();
        let d = autoload_descriptor();
        let items = resolve_items(&vfs, "db", "files.json", &d);
        assert_eq!(items, d.items);
    }

    #[test]
    fn resolve_falls_back_on_malformed_manifest() {
        let mut vfs = MemoryVfs::new();
        vfs.insert_str("db/music/files.json", "not json at all");
        let d = autoload_descriptor();
        let items = resolve_items(&vfs, "db", "files.json", &d);
        assert_eq!(items, d.items);
    }

    #[test]
    fn resolve_ignores_non_autoload() {
        let mut vfs = MemoryVfs::new();
        vfs.insert_str("db/music/files.json", r#"["x.mp3"]"#);
        let mut d = autoload_descriptor();
        d.autoload = false;
        let items = resolve_items(&vfs, "db", "files.json", &d);
        assert_eq!(items, d.items);
    }

    #[test]
    fn resolve_requires_folder() {
        let mut d = autoload_descriptor();
        d.folder = None;
        let vfs = MemoryVfs::new();
        let items = resolve_items(&vfs, "db", "files.json", &d);
        assert_eq!(items, d.items);
    }
}
