//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`InuaSettings::default()`]
//! 2. If `~/.inua/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::InuaSettings;

/// Resolve the path to the settings file (`~/.inua/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".inua").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<InuaSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<InuaSettings> {
    let defaults = serde_json::to_value(InuaSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: InuaSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Each env var has strict parsing rules:
/// - Integers must be valid and within the specified range
/// - Booleans accept: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`
/// - Invalid values are silently ignored (fall back to file/default)
pub fn apply_env_overrides(settings: &mut InuaSettings) {
    // ── Server settings ─────────────────────────────────────────────
    if let Some(v) = read_env_string("INUA_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read_env_u16("INUA_PORT", 1, 65535) {
        settings.server.port = v;
    }

    // ── API settings ────────────────────────────────────────────────
    if let Some(v) = read_env_string("INUA_API_BASE_URL") {
        settings.api.base_url = v;
    }
    if let Some(v) = read_env_string("IOINTELLIGENCE_API_KEY") {
        settings.api.api_key = v;
    }
    if let Some(v) = read_env_string("LLM_MODEL_NAME") {
        settings.api.model = v;
    }
    if let Some(v) = read_env_u64("INUA_MODEL_TIMEOUT_MS", 500, 120_000) {
        settings.api.timeout_ms = v;
    }
    if let Some(v) = read_env_bool("INUA_CLASSIFIER_ENABLED") {
        settings.api.classifier_enabled = v;
    }

    // ── Safety settings ─────────────────────────────────────────────
    if let Some(v) = read_env_usize("INUA_MAX_INPUT_CHARS", 50, 10_000) {
        settings.safety.max_input_chars = v;
    }
    if let Some(v) = read_env_string("INUA_FALLBACK_TECHNIQUE") {
        settings.safety.fallback_technique_id = v;
    }

    // ── Catalog settings ────────────────────────────────────────────
    if let Some(v) = read_env_string("INUA_CATALOG_PATH") {
        settings.catalog.path = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `usize` within a range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_bool(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|v| parse_bool(&v))
}

fn read_env_u16(name: &str, min: u16, max: u16) -> Option<u16> {
    std::env::var(name)
        .ok()
        .and_then(|v| parse_u16_range(&v, min, max))
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    std::env::var(name)
        .ok()
        .and_then(|v| parse_u64_range(&v, min, max))
}

fn read_env_usize(name: &str, min: usize, max: usize) -> Option<usize> {
    std::env::var(name)
        .ok()
        .and_then(|v| parse_usize_range(&v, min, max))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
