//! # glot-settings
//!
//! Configuration management with layered sources for the glot pipeline.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`GlotSettings::default()`]
//! 2. **User file** — `~/.glot/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `GLOT_*` overrides (highest priority)
//!
//! The global singleton is reloadable: after the settings file changes,
//! [`reload_settings_from_path`] swaps the cached value so all subsequent
//! [`get_settings`] calls return fresh data.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::path::Path;
use std::sync::{Arc, RwLock};

/// Global settings singleton.
///
/// Uses `RwLock<Option<Arc<GlotSettings>>>` instead of `OnceLock` so the
/// cached value can be swapped after a reload. Reads are cheap (shared lock
/// + `Arc::clone`); writes only happen on reload, which is rare.
static SETTINGS: RwLock<Option<Arc<GlotSettings>>> = RwLock::new(None);

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.glot/settings.json` with env var
/// overrides. On subsequent calls, returns the cached value. If loading
/// fails, returns compiled defaults.
///
/// Returns an `Arc` so callers can hold a consistent snapshot even if
/// another thread reloads settings concurrently.
pub fn get_settings() -> Arc<GlotSettings> {
    // Fast path: read lock
    {
        let guard = SETTINGS.read().expect("settings lock poisoned");
        if let Some(ref s) = *guard {
            return Arc::clone(s);
        }
    }

    // Slow path: first access, take write lock
    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    // Double-check after acquiring write lock (another thread may have initialized)
    if let Some(ref s) = *guard {
        return Arc::clone(s);
    }

    let settings = Arc::new(match load_settings() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            GlotSettings::default()
        }
    });
    *guard = Some(Arc::clone(&settings));
    settings
}

/// Initialize the global settings with a specific value.
///
/// Replaces any previously cached settings. Useful for tests and startup
/// code where the settings path is known.
pub fn init_settings(settings: GlotSettings) {
    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    *guard = Some(Arc::new(settings));
}

/// Reload settings from a specific file path.
///
/// Reads the file, deep-merges over defaults, applies env overrides, and
/// atomically swaps the global cache. All subsequent [`get_settings`] calls
/// return the new values.
pub fn reload_settings_from_path(path: &Path) {
    let new = Arc::new(match load_settings_from_path(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, ?path, "failed to reload settings, falling back to defaults");
            GlotSettings::default()
        }
    });
    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    *guard = Some(new);
    tracing::info!(?path, "settings reloaded from disk");
}

/// Reset the global settings cache (test-only).
#[cfg(test)]
pub(crate) fn reset_settings() {
    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    *guard = None;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that mutate the global SETTINGS static must hold this lock
    /// to avoid racing with each other (Rust runs tests in parallel threads).
    static SETTINGS_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn re_exports_work() {
        let _settings = GlotSettings::default();
        let _path = settings_path();
    }

    #[test]
    fn init_settings_sets_custom_value() {
        let _lock = SETTINGS_MUTEX.lock().unwrap();
        reset_settings();
        let mut custom = GlotSettings::default();
        custom.transcription.max_workers = 2;
        init_settings(custom);
        assert_eq!(get_settings().transcription.max_workers, 2);
        reset_settings();
    }

    #[test]
    fn init_settings_replaces_previous() {
        let _lock = SETTINGS_MUTEX.lock().unwrap();
        reset_settings();
        let mut first = GlotSettings::default();
        first.translation.word_budget = 11;
        init_settings(first);
        assert_eq!(get_settings().translation.word_budget, 11);

        let mut second = GlotSettings::default();
        second.translation.word_budget = 22;
        init_settings(second);
        assert_eq!(get_settings().translation.word_budget, 22);
        reset_settings();
    }

    #[test]
    fn reload_settings_from_path_updates_cached_value() {
        let _lock = SETTINGS_MUTEX.lock().unwrap();
        reset_settings();

        init_settings(GlotSettings::default());
        assert_eq!(get_settings().transcription.segment_seconds, 30.0);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"transcription": {"segmentSeconds": 12.5}}"#).unwrap();

        reload_settings_from_path(&path);

        let updated = get_settings();
        assert_eq!(updated.transcription.segment_seconds, 12.5);
        // Other defaults preserved (deep merge)
        assert_eq!(updated.transcription.max_workers, 6);

        reset_settings();
    }

    #[test]
    fn reload_from_nonexistent_path_falls_back_to_defaults() {
        let _lock = SETTINGS_MUTEX.lock().unwrap();
        reset_settings();

        let mut custom = GlotSettings::default();
        custom.translation.word_budget = 7;
        init_settings(custom);
        assert_eq!(get_settings().translation.word_budget, 7);

        // A missing file loads cleanly as defaults-plus-env
        reload_settings_from_path(Path::new("/nonexistent/glot/settings.json"));
        assert_eq!(get_settings().translation.word_budget, 100);

        reset_settings();
    }

    #[test]
    fn get_settings_returns_arc_for_snapshot_isolation() {
        let _lock = SETTINGS_MUTEX.lock().unwrap();
        reset_settings();
        init_settings(GlotSettings::default());

        let snapshot = get_settings();
        assert_eq!(snapshot.transcription.max_workers, 6);

        let mut new = GlotSettings::default();
        new.transcription.max_workers = 3;
        init_settings(new);

        // Snapshot still sees old value (Arc isolation)
        assert_eq!(snapshot.transcription.max_workers, 6);
        assert_eq!(get_settings().transcription.max_workers, 3);

        reset_settings();
    }
}
