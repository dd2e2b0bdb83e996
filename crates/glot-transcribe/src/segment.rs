//! Segmenter — slices the audio timeline into fixed-length windows.
//!
//! Long audio is transcribed window-by-window in parallel; the planner here
//! only deals in time, never in samples. Windows are contiguous,
//! non-overlapping, index-ordered, and cover `[0, duration)` exactly.

use crate::types::AudioWindow;

/// Smallest representable window length: one sample at 16 kHz.
///
/// Keeps `start < end` even for the degenerate zero-duration case.
pub const MIN_WINDOW_SECONDS: f64 = 1.0 / 16_000.0;

/// Plan `ceil(duration / window_seconds)` contiguous windows
/// `[i*W, min((i+1)*W, duration))`.
///
/// A non-positive (or NaN) duration degenerates to a single window clamped
/// to [`MIN_WINDOW_SECONDS`] — callers are expected to reject empty media
/// upstream, but the planner never emits an inverted window.
pub fn plan_windows(duration: f64, window_seconds: f64) -> Vec<AudioWindow> {
    let window = if window_seconds > 0.0 {
        window_seconds
    } else {
        MIN_WINDOW_SECONDS
    };

    if duration.is_nan() || duration <= 0.0 {
        return vec![AudioWindow {
            index: 0,
            start: 0.0,
            end: MIN_WINDOW_SECONDS,
        }];
    }

    let count = (duration / window).ceil().max(1.0) as usize;
    let mut windows = Vec::with_capacity(count);
    for index in 0..count {
        let start = index as f64 * window;
        // Float rounding in ceil() can overcount by one; a spurious window
        // starting at or past the end is dropped here.
        if index > 0 && start >= duration {
            break;
        }
        let end = ((index + 1) as f64 * window).min(duration);
        windows.push(AudioWindow { index, start, end });
    }
    // The last window always ends exactly at the duration; without this,
    // float rounding in ceil() can leave a sub-microsecond tail uncovered.
    if let Some(last) = windows.last_mut() {
        last.end = duration;
    }
    windows
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
