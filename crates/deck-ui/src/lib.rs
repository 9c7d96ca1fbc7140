//! deck-ui: Higher-level UI abstractions built on `SdiBackend`.
//!
//! This crate provides layout helpers, a themed drawing context, and the
//! small widget set the shell needs: list slot text, control buttons, a
//! synthetic scrollbar, and a progress bar. All rendering goes through
//! `SdiBackend` trait methods -- no platform-specific code.

pub mod button;
pub mod context;
pub mod layout;
pub mod progress_bar;
pub mod scrollbar;
pub mod theme;
pub mod widget;

pub mod test_utils;

pub use context::DrawContext;
pub use layout::Padding;
pub use theme::Theme;
pub use widget::Widget;
