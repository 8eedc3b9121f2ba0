//! Breathing phase timings and per-phase display text.

use serde::{Deserialize, Serialize};

/// Timing of one breathing cycle, in whole seconds.
///
/// Hold phases of zero mean the phase is skipped entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingPhases {
    /// Inhale duration.
    #[serde(default)]
    pub inhale_sec: u32,
    /// Hold after inhaling.
    #[serde(default)]
    pub hold_in_sec: u32,
    /// Exhale duration.
    #[serde(default)]
    pub exhale_sec: u32,
    /// Hold after exhaling.
    #[serde(default)]
    pub hold_out_sec: u32,
}

impl BreathingPhases {
    /// Create a full four-phase cycle.
    #[must_use]
    pub fn new(inhale_sec: u32, hold_in_sec: u32, exhale_sec: u32, hold_out_sec: u32) -> Self {
        Self {
            inhale_sec,
            hold_in_sec,
            exhale_sec,
            hold_out_sec,
        }
    }

    /// The same cycle with both hold phases removed.
    #[must_use]
    pub fn without_holds(self) -> Self {
        Self {
            hold_in_sec: 0,
            hold_out_sec: 0,
            ..self
        }
    }

    /// Whether either hold phase is nonzero.
    #[must_use]
    pub fn has_holds(&self) -> bool {
        self.hold_in_sec > 0 || self.hold_out_sec > 0
    }

    /// Total length of one cycle in seconds.
    #[must_use]
    pub fn cycle_secs(&self) -> u32 {
        self.inhale_sec + self.hold_in_sec + self.exhale_sec + self.hold_out_sec
    }
}

/// Display labels shown on the breathing screen, keyed by phase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiTexts {
    /// Label for the inhale phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inhale: Option<String>,
    /// Label for the post-inhale hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_in: Option<String>,
    /// Label for the exhale phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhale: Option<String>,
    /// Label for the post-exhale hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_out: Option<String>,
    /// Optional caption under the sound toggle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_sound_text: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
