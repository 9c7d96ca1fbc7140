//! Software framebuffer backend.
//!
//! Implements `SdiBackend` by rasterizing into a `Vec<u8>` RGBA buffer the
//! host can copy to a window, a capture file, or a test assertion, and an
//! `InputBackend` fed from a scripted or host-injected event queue. No
//! display server or GPU is required.

pub mod input;
pub mod renderer;

pub use input::QueueInput;
pub use renderer::FbBackend;
