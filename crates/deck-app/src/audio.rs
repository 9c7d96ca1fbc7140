//! Silent audio backend for machines without an output device.
//!
//! The shell is driven the same way whether or not sound comes out, so the
//! desktop binaries carry this stand-in instead of linking the native
//! backend (deck-backend-cpal, built separately). State is tracked so the
//! control surface behaves: tracks load, play, seek, and report a duration
//! estimated from the payload size.

use deck_core::backend::{AudioBackend, AudioTrackId};
use deck_core::error::{DeckError, Result};

/// Assumed payload byte rate, matching the demo archive's 22 kHz mono
/// 16-bit PCM clips. Only used for the duration readout.
const BYTES_PER_SECOND: u64 = 44_100;

pub struct SilentAudio {
    loaded: Option<AudioTrackId>,
    next_id: u64,
    playing: bool,
    position_ms: u64,
    duration_ms: u64,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self {
            loaded: None,
            next_id: 0,
            playing: false,
            position_ms: 0,
            duration_ms: 0,
        }
    }

    fn check_track(&self, track: AudioTrackId) -> Result<()> {
        if self.loaded == Some(track) {
            Ok(())
        } else {
            Err(DeckError::Playback(format!("unknown track id {}", track.0)))
        }
    }
}

impl Default for SilentAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for SilentAudio {
    fn init(&mut self) -> Result<()> {
        log::info!("audio: silent backend, no output device in use");
        Ok(())
    }

    fn load_track(&mut self, data: &[u8]) -> Result<AudioTrackId> {
        let id = AudioTrackId(self.next_id);
        self.next_id += 1;
        self.loaded = Some(id);
        self.playing = false;
        self.position_ms = 0;
        self.duration_ms = data.len() as u64 * 1000 / BYTES_PER_SECOND;
        Ok(id)
    }

    fn play(&mut self, track: AudioTrackId) -> Result<()> {
        self.check_track(track)?;
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.playing = false;
        self.position_ms = 0;
        Ok(())
    }

    fn seek_ms(&mut self, position: u64) -> Result<()> {
        self.position_ms = position.min(self.duration_ms);
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) -> Result<()> {
        Ok(())
    }

    fn set_gain(&mut self, _gain: f32) -> Result<()> {
        Ok(())
    }

    fn set_rate(&mut self, _rate: f32) -> Result<()> {
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn finished(&self) -> bool {
        false
    }

    fn position_ms(&self) -> u64 {
        self.position_ms
    }

    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn play_oneshot(&mut self, _data: &[u8], _start_ms: u64, _volume: f32, _rate: f32) -> Result<()> {
        Ok(())
    }

    fn unload_track(&mut self, track: AudioTrackId) -> Result<()> {
        self.check_track(track)?;
        self.loaded = None;
        self.playing = false;
        self.position_ms = 0;
        self.duration_ms = 0;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.loaded = None;
        self.playing = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_load_and_play() {
        let mut audio = SilentAudio::new();
        let id = audio.load_track(&[0u8; 44_100]).unwrap();
        assert_eq!(audio.duration_ms(), 1000);
        audio.play(id).unwrap();
        assert!(audio.is_playing());
        audio.seek_ms(5000).unwrap();
        assert_eq!(audio.position_ms(), 1000);
        audio.unload_track(id).unwrap();
        assert!(!audio.is_playing());
    }

    #[test]
    fn stale_track_ids_rejected() {
        let mut audio = SilentAudio::new();
        assert!(audio.play(AudioTrackId(7)).is_err());
        let id = audio.load_track(&[0u8; 100]).unwrap();
        audio.unload_track(id).unwrap();
        assert!(audio.play(id).is_err());
    }
}
