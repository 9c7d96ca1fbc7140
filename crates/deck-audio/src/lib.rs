//! deck-audio: the audio control surface and navigation sound cues.
//!
//! The surface owns playback state for one track: play/pause/stop, seek,
//! a 0-200% volume range mapped onto the backend's gain path when one is
//! available, discrete speed selection, and 2D keyboard focus over the
//! control button grid. Navigation cues are short fire-and-forget clips
//! with per-cue volume/rate settings.

pub mod cues;
pub mod grid;
pub mod poller;
pub mod surface;

pub mod test_utils;

pub use cues::{CueKind, CuePlayer};
pub use grid::FocusGrid;
pub use poller::ProgressPoller;
pub use surface::{AudioSurface, SurfaceButton, SurfaceEvent};
