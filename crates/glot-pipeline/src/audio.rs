//! WAV decoding into the in-memory audio representation.
//!
//! Handles the three sample formats `hound` can produce (i16, i32, f32) and
//! downmixes multi-channel audio by averaging across channels. Frames are
//! preserved; only channel count collapses to mono.

use std::path::Path;

use hound::{SampleFormat, WavReader};
use tracing::debug;

use glot_transcribe::AudioBuffer;

use crate::PipelineError;

/// Read a WAV file into a mono f32 buffer.
pub fn read_wav(path: &Path) -> Result<AudioBuffer, PipelineError> {
    let reader = WavReader::open(path).map_err(|e| PipelineError::Decode(e.to_string()))?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, _) => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| PipelineError::Decode(e.to_string()))?,
        (SampleFormat::Int, bits) => {
            let scale = 2.0_f32.powi(i32::from(bits) - 1);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| PipelineError::Decode(e.to_string()))?
        }
    };

    let mono = if channels == 1 {
        samples
    } else {
        samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    debug!(
        path = %path.display(),
        sample_rate = spec.sample_rate,
        channels,
        frames = mono.len(),
        "decoded wav"
    );
    Ok(AudioBuffer::new(mono, spec.sample_rate))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
