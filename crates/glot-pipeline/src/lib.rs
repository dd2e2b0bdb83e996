//! End-to-end media pipeline: decode → recognize → translate.
//!
//! # Architecture
//!
//! ```text
//! wav path → read_wav (hound, downmix) → AudioBuffer
//! → TranscriptionEngine (glot-transcribe)
//! → language normalization (glot-core tables)
//! → Orchestrator (glot-translate), size guard skips oversized transcripts
//! → ProcessOutput { transcript, translation }
//! ```
//!
//! ## Crate Position
//!
//! Depends on: glot-core, glot-settings, glot-transcribe, glot-translate.
//! Top of the workspace; a web layer would consume `MediaProcessor`.

pub mod audio;
pub mod processor;
pub mod scratch;

pub use audio::read_wav;
pub use processor::{MediaProcessor, ProcessOutput};
pub use scratch::ScratchWav;

use glot_core::lang::LangError;
use glot_transcribe::TranscribeError;
use glot_translate::TranslateError;

/// Errors surfaced by the pipeline.
///
/// Per-segment and per-target failures are absorbed in the layers below;
/// what reaches here is either capability-missing, nothing recognized, or
/// broken input.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Input file could not be decoded as audio.
    #[error("audio decode error: {0}")]
    Decode(String),

    /// Filesystem failure (scratch files, input access).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The language tables are inconsistent (build-time defect).
    #[error("language table error: {0}")]
    Lang(#[from] LangError),

    /// Recognition failed as a whole.
    #[error(transparent)]
    Transcribe(#[from] TranscribeError),

    /// Translation failed as a whole.
    #[error(transparent)]
    Translate(#[from] TranslateError),
}
