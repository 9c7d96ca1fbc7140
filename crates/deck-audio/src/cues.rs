//! Navigation sound cues.
//!
//! Short fire-and-forget clips played on selection movement, activation,
//! and initial page load. Each cue carries its own start offset, volume,
//! and playback rate. Playback failures are logged and swallowed -- a cue
//! must never block or delay the action that triggered it.

use deck_types::backend::AudioBackend;

/// Which cue to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueKind {
    /// Selection moved (short high beep).
    Move,
    /// Item activated or back navigation (softer blip).
    Activate,
    /// Page entered from elsewhere (click).
    PageLoad,
}

/// Per-cue playback settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueSettings {
    /// Offset into the clip, in milliseconds.
    pub start_ms: u64,
    /// Playback volume, 0.0-1.0.
    pub volume: f32,
    /// Playback rate, 1.0 = normal.
    pub rate: f32,
}

impl CueKind {
    /// Tuned playback settings for this cue.
    pub fn settings(self) -> CueSettings {
        match self {
            CueKind::Move => CueSettings {
                start_ms: 0,
                volume: 0.4,
                rate: 2.0,
            },
            CueKind::Activate => CueSettings {
                start_ms: 0,
                volume: 0.7,
                rate: 1.3,
            },
            CueKind::PageLoad => CueSettings {
                start_ms: 0,
                volume: 0.6,
                rate: 1.0,
            },
        }
    }
}

/// Holds the decoded cue clips and plays them through any audio backend.
#[derive(Debug, Default)]
pub struct CuePlayer {
    move_clip: Option<Vec<u8>>,
    activate_clip: Option<Vec<u8>>,
    page_load_clip: Option<Vec<u8>>,
}

impl CuePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the clip bytes for a cue. Missing clips simply never play.
    pub fn set_clip(&mut self, kind: CueKind, data: Vec<u8>) {
        match kind {
            CueKind::Move => self.move_clip = Some(data),
            CueKind::Activate => self.activate_clip = Some(data),
            CueKind::PageLoad => self.page_load_clip = Some(data),
        }
    }

    fn clip(&self, kind: CueKind) -> Option<&[u8]> {
        match kind {
            CueKind::Move => self.move_clip.as_deref(),
            CueKind::Activate => self.activate_clip.as_deref(),
            CueKind::PageLoad => self.page_load_clip.as_deref(),
        }
    }

    /// Play a cue, fire-and-forget. Failures are logged and ignored.
    pub fn play(&self, backend: &mut dyn AudioBackend, kind: CueKind) {
        let Some(data) = self.clip(kind) else {
            return;
        };
        let s = kind.settings();
        if let Err(e) = backend.play_oneshot(data, s.start_ms, s.volume, s.rate) {
            log::warn!("cue {kind:?} failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{AudioOp, MockAudioBackend};

    #[test]
    fn settings_per_cue() {
        let beep = CueKind::Move.settings();
        assert!((beep.volume - 0.4).abs() < f32::EPSILON);
        assert!((beep.rate - 2.0).abs() < f32::EPSILON);
        let blip = CueKind::Activate.settings();
        assert!((blip.volume - 0.7).abs() < f32::EPSILON);
        assert!((blip.rate - 1.3).abs() < f32::EPSILON);
        let click = CueKind::PageLoad.settings();
        assert!((click.volume - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn plays_seeded_clip_with_settings() {
        let mut cues = CuePlayer::new();
        cues.set_clip(CueKind::Move, vec![1, 2, 3]);
        let mut backend = MockAudioBackend::new();
        cues.play(&mut backend, CueKind::Move);
        assert_eq!(backend.ops.len(), 1);
        match &backend.ops[0] {
            AudioOp::Oneshot { len, volume, rate, .. } => {
                assert_eq!(*len, 3);
                assert!((volume - 0.4).abs() < f32::EPSILON);
                assert!((rate - 2.0).abs() < f32::EPSILON);
            },
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn missing_clip_is_silent() {
        let cues = CuePlayer::new();
        let mut backend = MockAudioBackend::new();
        cues.play(&mut backend, CueKind::Activate);
        assert!(backend.ops.is_empty());
    }

    #[test]
    fn playback_failure_is_swallowed() {
        let mut cues = CuePlayer::new();
        cues.set_clip(CueKind::PageLoad, vec![0]);
        let mut backend = MockAudioBackend::new();
        backend.fail_oneshot = true;
        // Must not panic or propagate.
        cues.play(&mut backend, CueKind::PageLoad);
    }
}
