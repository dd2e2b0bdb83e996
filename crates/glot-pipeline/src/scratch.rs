//! RAII scratch WAV files for file-input recognizers.
//!
//! Some recognizer backends only take a path. `ScratchWav` writes a sample
//! slice into a temp file and removes it on drop, so an abandoned task can
//! never leak a file.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::PipelineError;

/// A temporary WAV holding one segment's samples.
///
/// The file lives exactly as long as the value; drop deletes it.
pub struct ScratchWav {
    file: NamedTempFile,
}

impl ScratchWav {
    /// Write `samples` as a mono f32 WAV into the system temp dir.
    pub fn write(samples: &[f32], sample_rate: u32) -> Result<Self, PipelineError> {
        let file = tempfile::Builder::new()
            .prefix("glot-segment-")
            .suffix(".wav")
            .tempfile()?;
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(file.path(), spec)
            .map_err(|e| PipelineError::Decode(e.to_string()))?;
        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| PipelineError::Decode(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| PipelineError::Decode(e.to_string()))?;
        debug!(path = %file.path().display(), samples = samples.len(), "wrote scratch wav");
        Ok(Self { file })
    }

    /// Path to the scratch file, valid until drop.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::read_wav;

    #[test]
    fn round_trips_through_the_decoder() {
        let samples = vec![0.25, -0.25, 0.5];
        let scratch = ScratchWav::write(&samples, 16_000).unwrap();
        let audio = read_wav(scratch.path()).unwrap();
        assert_eq!(audio.samples(), samples.as_slice());
        assert_eq!(audio.sample_rate(), 16_000);
    }

    #[test]
    fn file_is_removed_on_drop() {
        let scratch = ScratchWav::write(&[0.0; 16], 16_000).unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.exists());
        drop(scratch);
        assert!(!path.exists());
    }
}
