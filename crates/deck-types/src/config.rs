//! Application configuration.
//!
//! Loaded from an optional `deck.toml` next to the binary; every field has
//! a default so a missing or partial file still yields a working shell.
//! The entry descriptor path may additionally be overridden per launch via
//! CLI argument or the `DECK_MENU` environment variable (resolution happens
//! in the app crate).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Shell configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Framebuffer width in pixels.
    pub screen_width: u32,
    /// Framebuffer height in pixels.
    pub screen_height: u32,
    /// Window title (used by windowed backends).
    pub window_title: String,
    /// Root of the content archive; all descriptor-relative paths resolve
    /// under this.
    pub base_path: String,
    /// Descriptor loaded at startup when no override is given.
    pub entry_menu: String,
    /// Target used when back/return navigation has nothing better.
    pub home_target: String,
    /// File name of the per-folder autoload manifest.
    pub manifest_name: String,
    /// Asset played on selection movement.
    pub move_cue: String,
    /// Asset played on activation / back.
    pub activate_cue: String,
    /// Asset played once at startup when not entering via the home menu.
    pub page_load_cue: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 400,
            window_title: "DATADECK".to_string(),
            base_path: "db".to_string(),
            entry_menu: "db/db.json".to_string(),
            home_target: "index.html".to_string(),
            manifest_name: "files.json".to_string(),
            move_cue: "assets/sounds/beep.mp3".to_string(),
            activate_cue: "assets/sounds/blip.mp3".to_string(),
            page_load_cue: "assets/sounds/click2.mp3".to_string(),
        }
    }
}

impl DeckConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file, falling back to defaults when the file does
    /// not exist. A file that exists but fails to parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// True when the given descriptor path is the configured entry menu.
    /// Used to decide whether the page-load cue fires at startup.
    pub fn is_home_menu(&self, menu_path: &str) -> bool {
        menu_path == self.entry_menu
    }
}
