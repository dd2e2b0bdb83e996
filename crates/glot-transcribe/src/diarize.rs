//! Speaker attribution — merging diarization intervals into a timed transcript.
//!
//! Diarization runs over the whole recording and yields speaker intervals;
//! recognition yields timed text spans. This module joins the two by maximum
//! temporal overlap and renders a grouped `[speaker]: text` view.

use tracing::debug;

use crate::types::{SpeakerInterval, TimedSpan, Transcript};

/// Speaker label used when a span overlaps no interval at all.
const UNKNOWN_SPEAKER: &str = "Unknown";

/// Attach diarization output to `transcript` in place.
///
/// No-op when either side is empty; diarization is best-effort and its
/// absence never degrades the plain transcript.
pub fn merge_speakers(transcript: &mut Transcript, intervals: &[SpeakerInterval]) {
    if transcript.spans.is_empty() || intervals.is_empty() {
        debug!(
            spans = transcript.spans.len(),
            intervals = intervals.len(),
            "skipping speaker merge"
        );
        return;
    }
    let labeled = assign_speakers(&transcript.spans, intervals);
    transcript.speaker_text = Some(render_grouped(&labeled));
    transcript.speakers = Some(intervals.to_vec());
}

/// Label each span with the speaker whose interval overlaps it the most.
///
/// Ties go to the interval seen first (intervals are in recording order,
/// so the earliest one wins); a candidate replaces the incumbent only on
/// strictly greater overlap. Spans overlapping nothing get [`UNKNOWN_SPEAKER`].
fn assign_speakers<'a>(
    spans: &'a [TimedSpan],
    intervals: &'a [SpeakerInterval],
) -> Vec<(&'a str, &'a str)> {
    spans
        .iter()
        .map(|span| {
            let mut best: Option<&str> = None;
            let mut best_overlap = 0.0_f64;
            for interval in intervals {
                let overlap =
                    (span.end.min(interval.end) - span.start.max(interval.start)).max(0.0);
                if overlap > best_overlap {
                    best_overlap = overlap;
                    best = Some(&interval.speaker);
                }
            }
            (best.unwrap_or(UNKNOWN_SPEAKER), span.text.trim())
        })
        .collect()
}

/// Render `(speaker, text)` pairs as `[speaker]: text` blocks, one per run
/// of consecutive spans from the same speaker, joined with newlines.
fn render_grouped(labeled: &[(&str, &str)]) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut current_speaker: Option<&str> = None;
    let mut current_text: Vec<&str> = Vec::new();

    for &(speaker, text) in labeled {
        if text.is_empty() {
            continue;
        }
        if current_speaker != Some(speaker) {
            flush(&mut blocks, current_speaker, &mut current_text);
            current_speaker = Some(speaker);
        }
        current_text.push(text);
    }
    flush(&mut blocks, current_speaker, &mut current_text);

    blocks.join("\n")
}

fn flush(blocks: &mut Vec<String>, speaker: Option<&str>, texts: &mut Vec<&str>) {
    if let Some(speaker) = speaker {
        if !texts.is_empty() {
            blocks.push(format!("[{speaker}]: {}", texts.join(" ")));
            texts.clear();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
