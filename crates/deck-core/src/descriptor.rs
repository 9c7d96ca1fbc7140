//! Menu descriptor documents.
//!
//! A descriptor is a fetched JSON document describing one menu: its items,
//! layout variant, return target, and optional viewer/autoload settings.
//! Descriptors are replaced wholesale on navigation, never mutated field by
//! field from two code paths.

use serde::Deserialize;

use deck_types::error::Result;

/// List layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Every item rendered once, no windowing.
    Locked,
    /// Nine-slot window centered on the selection.
    #[default]
    Scroll,
}

/// Payload kind a leaf item opens in the file viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Text,
    Md,
    Image,
    Audio,
}

impl FileKind {
    /// Folder used when the descriptor does not declare one.
    pub fn default_folder(self) -> &'static str {
        match self {
            FileKind::Text => "text",
            FileKind::Md => "md",
            FileKind::Image => "png",
            FileKind::Audio => "mp3",
        }
    }
}

/// Item role. Untyped items are leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Navigates back; its target overrides the descriptor's return target.
    Return,
    /// Loads a sub-menu.
    Menu,
    /// Opens the file viewer (when the descriptor declares a filetype).
    Leaf,
}

/// One menu entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuItem {
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: Option<ItemKind>,
    #[serde(default)]
    pub target: Option<String>,
}

impl MenuItem {
    /// A plain leaf item with only a label (autoloaded files).
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: None,
            target: None,
        }
    }

    pub fn is_return(&self) -> bool {
        self.kind == Some(ItemKind::Return)
    }

    /// Return and menu items never open the file viewer.
    pub fn opens_viewer(&self) -> bool {
        !matches!(self.kind, Some(ItemKind::Return) | Some(ItemKind::Menu))
    }
}

/// A parsed menu descriptor document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuDescriptor {
    pub items: Vec<MenuItem>,
    #[serde(default)]
    pub variant: Variant,
    /// Back-navigation target; item 0 conventionally mirrors it.
    #[serde(rename = "return", default)]
    pub return_target: Option<String>,
    /// Payload kind for leaf activation under the scroll variant.
    #[serde(default)]
    pub filetype: Option<FileKind>,
    /// Fetch a folder manifest and append its files on entry.
    #[serde(default)]
    pub autoload: bool,
    /// Folder under the content base; also used for viewer paths.
    #[serde(default)]
    pub folder: Option<String>,
}

impl MenuDescriptor {
    /// Parse a descriptor from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A target ending in a JSON-document suffix is a sub-menu to load;
/// anything else is an external navigation.
pub fn is_menu_path(target: &str) -> bool {
    target.ends_with(".json")
}
