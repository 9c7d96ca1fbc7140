//! Shared mixer state between the control thread and the cpal callback.
//!
//! One main track plus any number of fire-and-forget cue voices. The
//! callback resamples nearest-neighbor against the output rate; the same
//! step arithmetic implements playback-rate changes, so 2x speed is just a
//! doubled step.

use crate::decode::DecodedClip;

/// The loaded main track.
struct Track {
    clip: DecodedClip,
    /// Playback position in source frames.
    pos: f64,
}

/// A one-shot cue voice, dropped once exhausted.
struct Oneshot {
    clip: DecodedClip,
    pos: f64,
    volume: f32,
    rate: f32,
}

/// Mixes the main track and cue voices into interleaved output frames.
pub struct Mixer {
    out_rate: u32,
    track: Option<Track>,
    playing: bool,
    finished: bool,
    /// Output gain, 0.0-2.0 (the amplified path).
    gain: f32,
    rate: f32,
    oneshots: Vec<Oneshot>,
}

impl Mixer {
    pub fn new(out_rate: u32) -> Self {
        Self {
            out_rate,
            track: None,
            playing: false,
            finished: false,
            gain: 1.0,
            rate: 1.0,
            oneshots: Vec::new(),
        }
    }

    pub fn set_output_rate(&mut self, out_rate: u32) {
        self.out_rate = out_rate;
    }

    pub fn load(&mut self, clip: DecodedClip) {
        self.track = Some(Track { clip, pos: 0.0 });
        self.playing = false;
        self.finished = false;
    }

    pub fn unload(&mut self) {
        self.track = None;
        self.playing = false;
        self.finished = false;
    }

    pub fn has_track(&self) -> bool {
        self.track.is_some()
    }

    pub fn play(&mut self) {
        if let Some(track) = &mut self.track {
            // Replaying a finished track starts over.
            if track.pos >= track.clip.frame_count() as f64 {
                track.pos = 0.0;
            }
            self.playing = true;
            self.finished = false;
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.finished = false;
        if let Some(track) = &mut self.track {
            track.pos = 0.0;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 2.0);
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.max(0.01);
    }

    pub fn seek_ms(&mut self, position: u64) {
        if let Some(track) = &mut self.track {
            let frame = position as f64 * track.clip.sample_rate as f64 / 1000.0;
            track.pos = frame.min(track.clip.frame_count() as f64);
            self.finished = false;
        }
    }

    pub fn position_ms(&self) -> u64 {
        self.track.as_ref().map_or(0, |t| {
            if t.clip.sample_rate == 0 {
                return 0;
            }
            (t.pos * 1000.0 / t.clip.sample_rate as f64) as u64
        })
    }

    pub fn duration_ms(&self) -> u64 {
        self.track.as_ref().map_or(0, |t| t.clip.duration_ms())
    }

    pub fn play_oneshot(&mut self, clip: DecodedClip, start_ms: u64, volume: f32, rate: f32) {
        let pos = start_ms as f64 * clip.sample_rate as f64 / 1000.0;
        self.oneshots.push(Oneshot {
            clip,
            pos,
            volume: volume.clamp(0.0, 1.0),
            rate: rate.max(0.01),
        });
    }

    /// Fill an interleaved output buffer. `out_channels` frames are written
    /// per position; channels past the first two get silence.
    pub fn fill(&mut self, out: &mut [f32], out_channels: usize) {
        out.fill(0.0);
        if out_channels == 0 || self.out_rate == 0 {
            return;
        }
        let frames = out.len() / out_channels;

        if self.playing {
            if let Some(track) = &mut self.track {
                let step =
                    track.clip.sample_rate as f64 / self.out_rate as f64 * self.rate as f64;
                let total = track.clip.frame_count();
                for frame in 0..frames {
                    let src = track.pos as usize;
                    if src >= total {
                        self.playing = false;
                        self.finished = true;
                        track.pos = total as f64;
                        break;
                    }
                    let base = frame * out_channels;
                    out[base] = track.clip.samples[src * 2] * self.gain;
                    if out_channels > 1 {
                        out[base + 1] = track.clip.samples[src * 2 + 1] * self.gain;
                    }
                    track.pos += step;
                }
            }
        }

        for shot in &mut self.oneshots {
            let step = shot.clip.sample_rate as f64 / self.out_rate as f64 * shot.rate as f64;
            let total = shot.clip.frame_count();
            for frame in 0..frames {
                let src = shot.pos as usize;
                if src >= total {
                    break;
                }
                let base = frame * out_channels;
                out[base] += shot.clip.samples[src * 2] * shot.volume;
                if out_channels > 1 {
                    out[base + 1] += shot.clip.samples[src * 2 + 1] * shot.volume;
                }
                shot.pos += step;
            }
        }
        self.oneshots
            .retain(|s| (s.pos as usize) < s.clip.frame_count());

        // Hard limit; cue voices stacked on a 2x gain track can clip.
        for s in out.iter_mut() {
            *s = s.clamp(-1.0, 1.0);
        }
    }
}
