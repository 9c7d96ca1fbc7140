//! DATADECK core: the keyboard-driven navigation shell.
//!
//! Platform-agnostic menu/file-viewer state machine: JSON menu descriptors,
//! locked and scroll-windowed list layouts, a file viewer for text, markdown,
//! image and audio payloads, and typed keyboard dispatch. All I/O goes
//! through the `Vfs` and backend traits; this crate has zero platform
//! dependencies.

// Re-exports from deck-types (foundation types and traits).
pub use deck_types::backend;
pub use deck_types::config;
pub use deck_types::error;
pub use deck_types::input;

pub use deck_audio as audio;
pub use deck_ui as ui;
pub use deck_vfs as vfs;

pub mod autoload;
pub mod descriptor;
pub mod markdown;
pub mod menu;
pub mod nav;
pub mod shell;
pub mod viewer;

pub use descriptor::{FileKind, ItemKind, MenuDescriptor, MenuItem, Variant};
pub use menu::MenuState;
pub use nav::{Mode, Resolution};
pub use shell::{Shell, ShellEvent};
pub use viewer::FileViewer;
