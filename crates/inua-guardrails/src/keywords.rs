//! Keyword stage of the crisis classifier.
//!
//! Lists live behind [`CrisisMatcher`] so they can be replaced or made
//! locale-aware without touching the classification flow.

use inua_core::CrisisCategory;

/// Self-harm intent phrases. Checked before the medical list; a match
/// here wins when both lists match.
const SUICIDE_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "want to die",
    "help me die",
    "overdose",
    "cut my wrists",
];

/// Acute medical emergency phrases.
const MEDICAL_KEYWORDS: &[&str] = &[
    "heart attack",
    "chest pain",
    "tightness in chest",
    "not breathing",
    "baby not breathing",
    "choking",
    "pass out",
    "ambulance",
];

/// Pattern-matching capability of the keyword stage.
pub trait CrisisMatcher: Send + Sync {
    /// Category of the first matching list, or `None` on a clean miss.
    fn match_category(&self, input: &str) -> Option<CrisisCategory>;
}

/// Case-insensitive substring matcher over the fixed English lists.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordMatcher;

impl CrisisMatcher for KeywordMatcher {
    fn match_category(&self, input: &str) -> Option<CrisisCategory> {
        let lower = input.to_lowercase();
        if SUICIDE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return Some(CrisisCategory::Suicide);
        }
        if MEDICAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return Some(CrisisCategory::MedicalEmergency);
        }
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
