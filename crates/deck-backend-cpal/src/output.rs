//! cpal output stream management.

use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use deck_types::error::{DeckError, Result};
use parking_lot::Mutex;

use crate::mixer::Mixer;

/// A running output stream feeding from the shared mixer.
pub struct OutputStream {
    // Held for its Drop; the callback runs as long as this lives.
    _stream: cpal::Stream,
    sample_rate: u32,
    channels: u16,
}

impl OutputStream {
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }
}

/// Open the default output device with its default config and start the
/// callback draining `mixer`.
pub fn open_default(mixer: Arc<Mutex<Mixer>>) -> Result<OutputStream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| DeckError::Playback("no default output device".into()))?;
    let config = device
        .default_output_config()
        .map_err(|e| DeckError::Playback(format!("no output config: {e}")))?;
    let sample_rate = config.sample_rate().0;
    let channels = config.channels().min(2);
    let stream_config = cpal::StreamConfig {
        channels,
        sample_rate: config.sample_rate(),
        buffer_size: cpal::BufferSize::Default,
    };
    mixer.lock().set_output_rate(sample_rate);

    let cb_mixer = Arc::clone(&mixer);
    let stream = device
        .build_output_stream(
            &stream_config,
            move |data: &mut [f32], _| {
                cb_mixer.lock().fill(data, channels as usize);
            },
            |e| log::error!("output stream error: {e}"),
            None,
        )
        .map_err(|e| DeckError::Playback(format!("stream open failed: {e}")))?;
    stream
        .play()
        .map_err(|e| DeckError::Playback(format!("stream start failed: {e}")))?;
    log::info!("audio output at {sample_rate} Hz, {channels} ch");

    Ok(OutputStream {
        _stream: stream,
        sample_rate,
        channels,
    })
}
