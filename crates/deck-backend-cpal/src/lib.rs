//! Native audio backend.
//!
//! Implements `AudioBackend` on top of cpal for real-time output and
//! symphonia for decoding MP3/WAV payloads. Decoded clips are mixed in a
//! shared [`mixer::Mixer`] the cpal callback drains; the control surface's
//! gain, rate, and seek operations mutate mixer state under a short
//! `parking_lot` lock.

pub mod backend;
pub mod decode;
pub mod mixer;
pub mod output;

pub use backend::CpalBackend;
