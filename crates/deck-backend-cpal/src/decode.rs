//! Payload decoding via symphonia.

use deck_types::error::{DeckError, Result};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// A fully decoded clip: interleaved stereo f32 frames.
#[derive(Debug, Clone)]
pub struct DecodedClip {
    pub sample_rate: u32,
    /// Interleaved `[l, r, l, r, ..]`.
    pub samples: Vec<f32>,
}

impl DecodedClip {
    pub fn frame_count(&self) -> usize {
        self.samples.len() / 2
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.frame_count() as u64 * 1000 / self.sample_rate as u64
    }
}

/// Fold an interleaved buffer of `channels` down to stereo.
fn to_stereo(interleaved: &[f32], channels: usize) -> Vec<f32> {
    match channels {
        2 => interleaved.to_vec(),
        1 => {
            let mut out = Vec::with_capacity(interleaved.len() * 2);
            for s in interleaved {
                out.push(*s);
                out.push(*s);
            }
            out
        },
        n => {
            // Take the first two channels, drop the rest.
            let mut out = Vec::with_capacity(interleaved.len() / n * 2);
            for frame in interleaved.chunks_exact(n) {
                out.push(frame[0]);
                out.push(frame[1]);
            }
            out
        },
    }
}

/// Decode a compressed payload into a stereo clip.
pub fn decode(data: &[u8]) -> Result<DecodedClip> {
    let mss = MediaSourceStream::new(
        Box::new(std::io::Cursor::new(data.to_vec())),
        Default::default(),
    );
    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DeckError::Playback(format!("unrecognized audio container: {e}")))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DeckError::Playback("no decodable audio track".into()))?;
    let track_id = track.id;
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| DeckError::Playback(format!("decoder init failed: {e}")))?;

    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(44_100);
    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            // End of stream surfaces as an I/O error from the source.
            Err(SymphoniaError::IoError(_)) | Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(DeckError::Playback(format!("demux failed: {e}"))),
        };
        if packet.track_id() != track_id {
            continue;
        }
        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = spec.rate;
                let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buf.copy_interleaved_ref(decoded);
                samples.extend(to_stereo(buf.samples(), spec.channels.count()));
            },
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("skipping undecodable packet: {e}");
            },
            Err(e) => return Err(DeckError::Playback(format!("decode failed: {e}"))),
        }
    }

    if samples.is_empty() {
        return Err(DeckError::Playback("payload decoded to zero frames".into()));
    }
    Ok(DecodedClip {
        sample_rate,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_rejected() {
        assert!(decode(b"definitely not audio").is_err());
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn mono_folds_to_stereo() {
        let out = to_stereo(&[0.1, 0.2], 1);
        assert_eq!(out, vec![0.1, 0.1, 0.2, 0.2]);
    }

    #[test]
    fn surround_takes_front_pair() {
        let out = to_stereo(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 6);
        assert_eq!(out, vec![1.0, 2.0]);
    }

    #[test]
    fn clip_duration() {
        let clip = DecodedClip {
            sample_rate: 44_100,
            samples: vec![0.0; 44_100 * 2],
        };
        assert_eq!(clip.frame_count(), 44_100);
        assert_eq!(clip.duration_ms(), 1000);
    }
}
