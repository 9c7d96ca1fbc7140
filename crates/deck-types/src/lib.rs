//! Foundation types and traits for DATADECK.
//!
//! This crate contains the platform-agnostic core types shared by all
//! DATADECK crates: colors, input events, backend trait definitions,
//! configuration, error types, and the bitmap font data used by software
//! renderers.

pub mod backend;
pub mod bitmap_font;
pub mod config;
pub mod error;
pub mod input;
