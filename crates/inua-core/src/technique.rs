//! Technique catalog records and their per-record context rules.

use serde::{Deserialize, Serialize};

use crate::phases::{BreathingPhases, UiTexts};
use crate::profile::TimePeriod;

/// Time-of-day gate on a technique.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// Daytime only.
    Day,
    /// Nighttime only.
    Night,
    /// No restriction.
    Any,
}

/// How a technique behaves for pregnant users.
///
/// Anything the loader cannot recognize is downgraded to [`Block`]
/// before a record enters the catalog.
///
/// [`Block`]: PregnancyLogic::Block
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PregnancyLogic {
    /// Offered as-is (hold phases are still stripped for pregnant users).
    Safe,
    /// Never offered to pregnant users.
    Block,
    /// Offered with replacement phases from `pregnancy_mod_phases`.
    Modify,
}

/// Context rules attached to a catalog record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRules {
    /// Allowed times of day. Empty means unrestricted.
    #[serde(default)]
    pub time_of_day: Vec<TimeOfDay>,
    /// Pregnancy handling for this technique.
    pub pregnancy_logic: PregnancyLogic,
    /// Replacement phases when `pregnancy_logic` is `MODIFY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnancy_mod_phases: Option<BreathingPhases>,
    /// Suggested substitute when this technique is blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnancy_alternative_id: Option<String>,
}

impl ContextRules {
    /// Whether this technique may be offered during `period`.
    #[must_use]
    pub fn allows_time(&self, period: TimePeriod) -> bool {
        if self.time_of_day.is_empty() {
            return true;
        }
        self.time_of_day.iter().any(|t| match t {
            TimeOfDay::Any => true,
            TimeOfDay::Day => period == TimePeriod::Day,
            TimeOfDay::Night => period == TimePeriod::Night,
        })
    }
}

impl Default for ContextRules {
    fn default() -> Self {
        Self {
            time_of_day: Vec::new(),
            pregnancy_logic: PregnancyLogic::Safe,
            pregnancy_mod_phases: None,
            pregnancy_alternative_id: None,
        }
    }
}

/// Prompting hints for the selection model. Never shown to the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// What the technique is for, in one line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Short instruction summary used in the selection prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_clue: Option<String>,
}

/// A validated catalog record.
///
/// Records are produced by the catalog loader, which guarantees that
/// `MODIFY` records carry override phases and that override phases
/// contain no hold time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technique {
    /// Unique identifier, e.g. `"box_breathing"`.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category label, e.g. `"calm"` or `"sleep"`.
    #[serde(default)]
    pub category: String,
    /// Suggested session length in seconds.
    pub default_duration_sec: u32,
    /// One breathing cycle.
    pub phases: BreathingPhases,
    /// Context rules governing when this record may surface.
    #[serde(default)]
    pub context_rules: ContextRules,
    /// Per-phase display labels.
    #[serde(default)]
    pub ui_texts: UiTexts,
    /// Prompting hints.
    #[serde(default)]
    pub agent_config: AgentConfig,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pregnancy_logic_serde_uses_uppercase() {
        assert_eq!(
            serde_json::to_string(&PregnancyLogic::Block).unwrap(),
            "\"BLOCK\""
        );
        let logic: PregnancyLogic = serde_json::from_str("\"MODIFY\"").unwrap();
        assert_eq!(logic, PregnancyLogic::Modify);
    }

    #[test]
    fn time_of_day_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&TimeOfDay::Night).unwrap(), "\"night\"");
    }

    #[test]
    fn empty_time_list_allows_everything() {
        let rules = ContextRules::default();
        assert!(rules.allows_time(TimePeriod::Day));
        assert!(rules.allows_time(TimePeriod::Night));
    }

    #[test]
    fn any_sentinel_allows_everything() {
        let rules = ContextRules {
            time_of_day: vec![TimeOfDay::Any],
            ..ContextRules::default()
        };
        assert!(rules.allows_time(TimePeriod::Day));
        assert!(rules.allows_time(TimePeriod::Night));
    }

    #[test]
    fn night_only_excludes_day() {
        let rules = ContextRules {
            time_of_day: vec![TimeOfDay::Night],
            ..ContextRules::default()
        };
        assert!(!rules.allows_time(TimePeriod::Day));
        assert!(rules.allows_time(TimePeriod::Night));
    }

    #[test]
    fn mixed_list_matches_either_entry() {
        let rules = ContextRules {
            time_of_day: vec![TimeOfDay::Day, TimeOfDay::Night],
            ..ContextRules::default()
        };
        assert!(rules.allows_time(TimePeriod::Day));
        assert!(rules.allows_time(TimePeriod::Night));
    }

    #[test]
    fn technique_deserializes_from_catalog_json() {
        let json = serde_json::json!({
            "id": "4_7_8_sleep",
            "title": "4-7-8 Breathing",
            "category": "sleep",
            "default_duration_sec": 180,
            "phases": {"inhale_sec": 4, "hold_in_sec": 7, "exhale_sec": 8, "hold_out_sec": 0},
            "context_rules": {
                "time_of_day": ["night"],
                "pregnancy_logic": "MODIFY",
                "pregnancy_mod_phases": {"inhale_sec": 4, "hold_in_sec": 0, "exhale_sec": 6, "hold_out_sec": 0}
            },
            "agent_config": {"purpose": "Fall asleep faster"}
        });

        let tech: Technique = serde_json::from_value(json).unwrap();
        assert_eq!(tech.id, "4_7_8_sleep");
        assert_eq!(tech.context_rules.pregnancy_logic, PregnancyLogic::Modify);
        assert_eq!(
            tech.context_rules.pregnancy_mod_phases.unwrap().exhale_sec,
            6
        );
        assert_eq!(tech.agent_config.purpose.as_deref(), Some("Fall asleep faster"));
    }
}
