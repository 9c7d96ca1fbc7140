//! Recording audio backend for tests.
//!
//! Mirrors the render-side `MockBackend` in deck-ui: every call is logged
//! as an [`AudioOp`] so tests can assert on the exact command sequence.
//! Lives outside `#[cfg(test)]` so downstream crates can drive their own
//! playback tests against it.

use deck_types::backend::{AudioBackend, AudioTrackId};
use deck_types::error::{DeckError, Result};

/// A recorded audio backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioOp {
    Load { len: usize },
    Play(AudioTrackId),
    Pause,
    Stop,
    Seek(u64),
    SetVolume(f32),
    SetGain(f32),
    SetRate(f32),
    Oneshot { len: usize, start_ms: u64, volume: f32, rate: f32 },
    Unload(AudioTrackId),
}

/// An in-memory audio backend that records operations and simulates a
/// track position/duration clock driven by explicit test nudges.
pub struct MockAudioBackend {
    pub ops: Vec<AudioOp>,
    /// When set, `set_gain` fails (simulates a backend without an
    /// amplification path).
    pub no_gain: bool,
    /// When set, `play_oneshot` fails (simulates autoplay restriction).
    pub fail_oneshot: bool,
    pub playing: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
    finished: bool,
    next_track: u64,
}

impl MockAudioBackend {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            no_gain: false,
            fail_oneshot: false,
            playing: false,
            position_ms: 0,
            duration_ms: 180_000,
            finished: false,
            next_track: 0,
        }
    }

    /// Simulate the track reaching its natural end.
    pub fn finish_naturally(&mut self) {
        self.playing = false;
        self.position_ms = self.duration_ms;
        self.finished = true;
    }

    /// Gain values applied so far.
    pub fn gains(&self) -> Vec<f32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                AudioOp::SetGain(g) => Some(*g),
                _ => None,
            })
            .collect()
    }

    /// Plain volume values applied so far.
    pub fn volumes(&self) -> Vec<f32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                AudioOp::SetVolume(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    /// Rates applied so far.
    pub fn rates(&self) -> Vec<f32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                AudioOp::SetRate(r) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockAudioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for MockAudioBackend {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn load_track(&mut self, data: &[u8]) -> Result<AudioTrackId> {
        self.ops.push(AudioOp::Load { len: data.len() });
        self.next_track += 1;
        self.finished = false;
        self.position_ms = 0;
        Ok(AudioTrackId(self.next_track))
    }

    fn play(&mut self, track: AudioTrackId) -> Result<()> {
        self.ops.push(AudioOp::Play(track));
        self.playing = true;
        self.finished = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.ops.push(AudioOp::Pause);
        self.playing = false;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.ops.push(AudioOp::Stop);
        self.playing = false;
        self.position_ms = 0;
        Ok(())
    }

    fn seek_ms(&mut self, position: u64) -> Result<()> {
        self.ops.push(AudioOp::Seek(position));
        self.position_ms = position.min(self.duration_ms);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.ops.push(AudioOp::SetVolume(volume));
        Ok(())
    }

    fn set_gain(&mut self, gain: f32) -> Result<()> {
        if self.no_gain {
            return Err(DeckError::Playback("gain path not available".into()));
        }
        self.ops.push(AudioOp::SetGain(gain));
        Ok(())
    }

    fn set_rate(&mut self, rate: f32) -> Result<()> {
        self.ops.push(AudioOp::SetRate(rate));
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn finished(&self) -> bool {
        self.finished
    }

    fn position_ms(&self) -> u64 {
        self.position_ms
    }

    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn play_oneshot(&mut self, data: &[u8], start_ms: u64, volume: f32, rate: f32) -> Result<()> {
        if self.fail_oneshot {
            return Err(DeckError::Playback("oneshot blocked".into()));
        }
        self.ops.push(AudioOp::Oneshot {
            len: data.len(),
            start_ms,
            volume,
            rate,
        });
        Ok(())
    }

    fn unload_track(&mut self, track: AudioTrackId) -> Result<()> {
        self.ops.push(AudioOp::Unload(track));
        self.playing = false;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}
