//! Segmented speech recognition with bounded-concurrency fan-out.
//!
//! # Architecture
//!
//! ```text
//! AudioBuffer → plan_windows (30s windows, ceil(D/W))
//! → worker pool (JoinSet + Semaphore, per-segment failure → empty result)
//! → assemble (index order, never completion order)
//! → optional diarization merge ([speaker]: text blocks)
//! → Transcript
//! ```
//!
//! Recognizer and diarizer are injected trait objects; this crate owns no
//! models and performs no I/O.
//!
//! ## Crate Position
//!
//! Standalone (no glot crate dependencies).
//! Depended on by: glot-pipeline.

pub mod assemble;
pub mod diarize;
pub mod engine;
pub mod pool;
pub mod recognizer;
pub mod segment;
pub mod types;

pub use engine::{EngineConfig, TranscriptionEngine};
pub use recognizer::{SpeakerDiarizer, SpeechRecognizer};
pub use types::{
    AudioBuffer, AudioWindow, RecognizeOptions, RecognizedSpeech, SegmentResult, SpeakerInterval,
    TimedSpan, TranscribeError, Transcript,
};
