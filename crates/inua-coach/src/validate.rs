//! Whitelist-and-coerce validation of the model's structured reply.
//!
//! The reply is untrusted: only a closed set of keys survives, every
//! value is coerced to a bounded string, and everything else is
//! dropped. No other layer ever sees the model's raw vocabulary.

use serde_json::{Map, Value};

/// Maximum length of the proposed technique id.
const MAX_ID_CHARS: usize = 64;
/// Maximum length of each narrative line.
const MAX_LINE_CHARS: usize = 300;
/// Maximum length of the reasoning trace.
const MAX_THOUGHT_CHARS: usize = 500;

/// The validated, bounded view of a selection reply.
///
/// The `technique_id` is advisory only: resolution against the
/// candidate set happens later, and an id outside the set is replaced
/// deterministically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionResult {
    /// Proposed technique id.
    pub technique_id: Option<String>,
    /// Short validating sentence.
    pub empathy_line: Option<String>,
    /// One-sentence rationale for the pick.
    pub reason_line: Option<String>,
    /// Model's own reasoning trace, kept for observability only.
    pub thought_process: Option<String>,
}

impl SelectionResult {
    /// Validate a parsed reply object against the key whitelist.
    #[must_use]
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            technique_id: coerce(object.get("technique_id"), MAX_ID_CHARS),
            empathy_line: coerce(object.get("empathy_line"), MAX_LINE_CHARS),
            reason_line: coerce(object.get("reason_line"), MAX_LINE_CHARS),
            thought_process: coerce(object.get("thought_process"), MAX_THOUGHT_CHARS),
        }
    }
}

/// Coerce a scalar value to a bounded, trimmed string.
///
/// Arrays, objects, nulls, and empty strings coerce to `None`.
fn coerce(value: Option<&Value>, max_chars: usize) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    let text: String = text.trim().chars().take(max_chars).collect();
    (!text.is_empty()).then_some(text)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
