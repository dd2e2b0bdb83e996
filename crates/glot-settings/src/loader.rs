//! Settings loading: defaults → file deep-merge → env overrides.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::Result;
use crate::types::GlotSettings;

/// Default settings file path: `~/.glot/settings.json`.
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(format!("{home}/.glot/settings.json"))
}

/// Deep-merge `overlay` into `base`.
///
/// Objects merge recursively; any other value type in `overlay` replaces the
/// corresponding value in `base`. Arrays replace wholesale — merging provider
/// lists element-wise would scramble chain order.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => deep_merge(base_val, overlay_val),
                    None => overlay_val,
                };
                let _ = base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Load settings from the default path with env overrides applied.
pub fn load_settings() -> Result<GlotSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from `path`, deep-merged over compiled defaults, with
/// `GLOT_*` env overrides applied last. A missing file is not an error —
/// defaults (plus env) are returned.
pub fn load_settings_from_path(path: &Path) -> Result<GlotSettings> {
    let defaults = serde_json::to_value(GlotSettings::default())?;

    let merged = if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        let file_val: Value = serde_json::from_str(&raw)?;
        deep_merge(defaults, file_val)
    } else {
        tracing::debug!(?path, "no settings file, using defaults");
        defaults
    };

    let mut settings: GlotSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    settings.validate();
    Ok(settings)
}

/// Apply `GLOT_*` environment variable overrides (highest priority).
fn apply_env_overrides(settings: &mut GlotSettings) {
    if let Ok(level) = std::env::var("GLOT_LOG_LEVEL") {
        settings.logging.level = level;
    }
    if let Ok(v) = std::env::var("GLOT_MAX_WORKERS") {
        match v.parse() {
            Ok(n) => settings.transcription.max_workers = n,
            Err(_) => tracing::warn!(value = %v, "ignoring invalid GLOT_MAX_WORKERS"),
        }
    }
    if let Ok(v) = std::env::var("GLOT_SEGMENT_SECONDS") {
        match v.parse() {
            Ok(n) => settings.transcription.segment_seconds = n,
            Err(_) => tracing::warn!(value = %v, "ignoring invalid GLOT_SEGMENT_SECONDS"),
        }
    }
    if let Ok(v) = std::env::var("GLOT_WORD_BUDGET") {
        match v.parse() {
            Ok(n) => settings.translation.word_budget = n,
            Err(_) => tracing::warn!(value = %v, "ignoring invalid GLOT_WORD_BUDGET"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
