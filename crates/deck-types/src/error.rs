//! Error types for DATADECK.

use std::io;

/// Errors produced by the DATADECK shell.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// A descriptor, manifest, or file-content fetch failed.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Amplified playback path (gain) could not be set up.
    #[error("playback error: {0}")]
    Playback(String),

    /// An image or audio asset failed to resolve its source.
    #[error("asset error: {0}")]
    Asset(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("VFS error: {0}")]
    Vfs(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, DeckError>;
