//! Tolerant JSON extraction from raw model replies.
//!
//! Models asked for "JSON only" still wrap their answer in prose or
//! markdown fences often enough that strict parsing would discard good
//! replies. Extraction scans for the first balanced `{...}` object,
//! respecting string literals and escapes, and fails open: `None` means
//! the caller degrades gracefully, never errors.

use serde_json::{Map, Value};
use tracing::warn;

/// Find the first balanced JSON object in `raw`.
///
/// Markdown code fences are ignored wherever they appear. Returns the
/// object as a string slice of the cleaned input, or `None` when no
/// balanced object exists.
#[must_use]
pub fn extract_first_json_object(raw: &str) -> Option<String> {
    let cleaned = raw.replace("```json", "").replace("```", "");

    let start = cleaned.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in cleaned[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(cleaned[start..=start + offset].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract and parse the first JSON object into a key/value map.
///
/// Returns `None` on missing or malformed objects and on objects whose
/// top level is not a map.
#[must_use]
pub fn parse_object(raw: &str) -> Option<Map<String, Value>> {
    let object = extract_first_json_object(raw)?;
    match serde_json::from_str::<Value>(&object) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            let preview: String = object.chars().take(100).collect();
            warn!(error = %e, preview, "extracted object failed to parse");
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
