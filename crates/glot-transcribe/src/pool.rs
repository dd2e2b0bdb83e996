//! Transcription worker pool — bounded concurrent segment transcription.
//!
//! One pool is created and fully drained per `recognize` call; nothing
//! outlives the call. Workers share only the read-only audio buffer and the
//! recognizer handle. Completion order is a race and is deliberately
//! discarded: every result carries its window index and the assembler
//! re-derives order from it.

use std::sync::Arc;

use metrics::counter;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::recognizer::SpeechRecognizer;
use crate::types::{AudioBuffer, AudioWindow, SegmentResult};

/// Transcribe every window concurrently, bounded by `max_workers`.
///
/// The effective concurrency is `min(max_workers, windows.len())`, forced to
/// 1 when the recognizer handle is not safe for concurrent calls. A failing
/// segment yields an empty [`SegmentResult`] — recognition is best-effort
/// per segment and one bad window never aborts the batch.
///
/// Results are returned in completion order; callers must sort by index.
pub async fn transcribe_windows(
    recognizer: Arc<dyn SpeechRecognizer>,
    audio: &AudioBuffer,
    windows: &[AudioWindow],
    language: Option<&str>,
    max_workers: usize,
) -> Vec<SegmentResult> {
    if windows.is_empty() {
        return Vec::new();
    }

    let workers = if recognizer.concurrent_safe() {
        max_workers.max(1).min(windows.len())
    } else {
        debug!("recognizer is not concurrent-safe, capping pool at 1");
        1
    };
    let permits = Arc::new(Semaphore::new(workers));
    debug!(windows = windows.len(), workers, "dispatching segment transcriptions");

    let mut tasks: JoinSet<SegmentResult> = JoinSet::new();
    for window in windows.iter().copied() {
        let recognizer = Arc::clone(&recognizer);
        let audio = audio.clone();
        let language = language.map(String::from);
        let permits = Arc::clone(&permits);

        let _abort = tasks.spawn(async move {
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return SegmentResult::empty(window.index),
            };
            transcribe_one(&*recognizer, &audio, window, language.as_deref()).await
        });
    }

    let mut results = Vec::with_capacity(windows.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            // A panicked task loses its window; the assembler tolerates gaps.
            Err(e) => error!(error = %e, "segment task failed to join"),
        }
    }
    results
}

/// Transcribe one window, converting failure into an empty result.
async fn transcribe_one(
    recognizer: &dyn SpeechRecognizer,
    audio: &AudioBuffer,
    window: AudioWindow,
    language: Option<&str>,
) -> SegmentResult {
    let samples = audio.slice_seconds(window.start, window.end);
    match recognizer
        .transcribe(samples, audio.sample_rate(), language)
        .await
    {
        Ok(speech) => {
            counter!("glot_segments_transcribed_total").increment(1);
            let spans = speech
                .spans
                .into_iter()
                .map(|mut span| {
                    // Recognizer timestamps are slice-relative; make absolute.
                    span.start += window.start;
                    span.end += window.start;
                    span
                })
                .collect();
            SegmentResult {
                index: window.index,
                text: speech.text,
                language: speech.language,
                spans,
            }
        }
        Err(e) => {
            counter!("glot_segments_failed_total").increment(1);
            warn!(index = window.index, error = %e, "segment transcription failed");
            SegmentResult::empty(window.index)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::plan_windows;
    use crate::types::{RecognizedSpeech, TimedSpan, TranscribeError};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::Duration;

    /// Recognizer that reads the window index out of the first sample.
    ///
    /// Test buffers are filled so `samples[0]` equals the window index,
    /// letting one recognizer produce distinct, per-window output. Later
    /// windows sleep less than earlier ones, so completion order inverts
    /// dispatch order.
    struct IndexRecognizer {
        fail_on: HashSet<usize>,
        in_flight: Arc<AtomicUsize>,
        max_in_flight: Arc<AtomicUsize>,
        concurrent: bool,
    }

    impl IndexRecognizer {
        fn new() -> Self {
            Self {
                fail_on: HashSet::new(),
                in_flight: Arc::new(AtomicUsize::new(0)),
                max_in_flight: Arc::new(AtomicUsize::new(0)),
                concurrent: true,
            }
        }

        fn failing_on(indices: &[usize]) -> Self {
            let mut rec = Self::new();
            rec.fail_on = indices.iter().copied().collect();
            rec
        }
    }

    #[async_trait]
    impl SpeechRecognizer for IndexRecognizer {
        async fn transcribe(
            &self,
            samples: &[f32],
            _sample_rate: u32,
            _language: Option<&str>,
        ) -> Result<RecognizedSpeech, TranscribeError> {
            let index = samples.first().copied().unwrap_or(0.0) as usize;

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            let _ = self
                .max_in_flight
                .fetch_max(now, Ordering::SeqCst);
            // Invert completion order relative to dispatch order.
            tokio::time::sleep(Duration::from_millis(20u64.saturating_sub(index as u64 * 2)))
                .await;
            let _ = self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_on.contains(&index) {
                return Err(TranscribeError::Inference(format!("segment {index} boom")));
            }
            Ok(RecognizedSpeech {
                text: format!("seg{index}"),
                language: if index == 0 { Some("en".into()) } else { None },
                spans: vec![TimedSpan {
                    start: 0.0,
                    end: 1.0,
                    text: format!("seg{index}"),
                }],
            })
        }

        fn concurrent_safe(&self) -> bool {
            self.concurrent
        }
    }

    /// Buffer where every sample in window `i` holds the value `i`.
    fn indexed_buffer(windows: usize, window_seconds: f64, rate: u32) -> AudioBuffer {
        let per_window = (window_seconds * f64::from(rate)) as usize;
        let samples = (0..windows)
            .flat_map(|i| std::iter::repeat_n(i as f32, per_window))
            .collect();
        AudioBuffer::new(samples, rate)
    }

    #[tokio::test]
    async fn all_windows_transcribed_with_correct_indices() {
        let audio = indexed_buffer(5, 1.0, 1_000);
        let windows = plan_windows(5.0, 1.0);
        let results = transcribe_windows(
            Arc::new(IndexRecognizer::new()),
            &audio,
            &windows,
            None,
            4,
        )
        .await;

        assert_eq!(results.len(), 5);
        let mut indices: Vec<_> = results.iter().map(|r| r.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        for r in &results {
            assert_eq!(r.text, format!("seg{}", r.index));
        }
    }

    #[tokio::test]
    async fn span_timestamps_are_offset_to_absolute() {
        let audio = indexed_buffer(3, 1.0, 1_000);
        let windows = plan_windows(3.0, 1.0);
        let mut results = transcribe_windows(
            Arc::new(IndexRecognizer::new()),
            &audio,
            &windows,
            None,
            3,
        )
        .await;
        results.sort_by_key(|r| r.index);

        assert_eq!(results[2].spans[0].start, 2.0);
        assert_eq!(results[2].spans[0].end, 3.0);
    }

    #[tokio::test]
    async fn failed_segment_becomes_empty_result() {
        let audio = indexed_buffer(4, 1.0, 1_000);
        let windows = plan_windows(4.0, 1.0);
        let mut results = transcribe_windows(
            Arc::new(IndexRecognizer::failing_on(&[1, 2])),
            &audio,
            &windows,
            None,
            4,
        )
        .await;
        results.sort_by_key(|r| r.index);

        assert_eq!(results.len(), 4, "failures never shrink the batch");
        assert_eq!(results[0].text, "seg0");
        assert!(results[1].text.is_empty());
        assert!(results[2].text.is_empty());
        assert!(results[2].spans.is_empty());
        assert_eq!(results[3].text, "seg3");
    }

    #[tokio::test]
    async fn concurrency_never_exceeds_worker_cap() {
        let rec = Arc::new(IndexRecognizer::new());
        let max_seen = Arc::clone(&rec.max_in_flight);
        let audio = indexed_buffer(8, 1.0, 1_000);
        let windows = plan_windows(8.0, 1.0);

        let _ = transcribe_windows(rec, &audio, &windows, None, 3).await;
        assert!(
            max_seen.load(Ordering::SeqCst) <= 3,
            "saw {} concurrent calls",
            max_seen.load(Ordering::SeqCst)
        );
    }

    #[tokio::test]
    async fn non_concurrent_recognizer_runs_serially() {
        let mut rec = IndexRecognizer::new();
        rec.concurrent = false;
        let rec = Arc::new(rec);
        let max_seen = Arc::clone(&rec.max_in_flight);
        let audio = indexed_buffer(4, 1.0, 1_000);
        let windows = plan_windows(4.0, 1.0);

        let _ = transcribe_windows(rec, &audio, &windows, None, 6).await;
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_window_list_yields_no_results() {
        let audio = indexed_buffer(1, 1.0, 1_000);
        let results = transcribe_windows(
            Arc::new(IndexRecognizer::new()),
            &audio,
            &[],
            None,
            4,
        )
        .await;
        assert!(results.is_empty());
    }
}
