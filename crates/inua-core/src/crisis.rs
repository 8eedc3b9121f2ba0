//! Crisis decisions produced by the two-stage classifier.

use serde::{Deserialize, Serialize};

/// Category attached to a crisis decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrisisCategory {
    /// Self-harm intent.
    Suicide,
    /// Acute medical emergency.
    MedicalEmergency,
    /// No crisis detected.
    None,
}

impl std::fmt::Display for CrisisCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Suicide => write!(f, "SUICIDE"),
            Self::MedicalEmergency => write!(f, "MEDICAL_EMERGENCY"),
            Self::None => write!(f, "NONE"),
        }
    }
}

/// Which classifier stage settled the decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    /// Keyword stage hit (authoritative, never overridden).
    Keyword,
    /// Model fallback classification.
    Model,
}

impl std::fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyword => write!(f, "keyword"),
            Self::Model => write!(f, "model"),
        }
    }
}

/// Outcome of crisis classification for one request.
///
/// Computed once per request and consumed immediately; never persisted
/// and never visible to the candidate or selection stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisDecision {
    /// Whether the request must short-circuit to the emergency path.
    pub is_crisis: bool,
    /// Category of the crisis, `NONE` when clear.
    pub category: CrisisCategory,
}

impl CrisisDecision {
    /// A non-crisis decision.
    #[must_use]
    pub fn clear() -> Self {
        Self {
            is_crisis: false,
            category: CrisisCategory::None,
        }
    }

    /// A crisis decision for `category`.
    #[must_use]
    pub fn crisis(category: CrisisCategory) -> Self {
        Self {
            is_crisis: true,
            category,
        }
    }

    /// Normalize a possibly-inconsistent pair into a coherent decision.
    ///
    /// A crisis must carry an actionable category: `is_crisis` with
    /// category `NONE` becomes `MEDICAL_EMERGENCY`. A non-crisis always
    /// reports `NONE` whatever category came with it.
    #[must_use]
    pub fn reconcile(is_crisis: bool, category: CrisisCategory) -> Self {
        if is_crisis {
            let category = if category == CrisisCategory::None {
                CrisisCategory::MedicalEmergency
            } else {
                category
            };
            Self::crisis(category)
        } else {
            Self::clear()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
