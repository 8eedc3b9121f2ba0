//! Candidate techniques: catalog records reshaped for one user profile.

use serde::{Deserialize, Serialize};

use crate::phases::{BreathingPhases, UiTexts};
use crate::technique::Technique;

/// Which normalization rule produced a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveContext {
    /// Non-pregnant profile, phases passed through unchanged.
    Unrestricted,
    /// Pregnant profile, `SAFE` record with hold phases forced to zero.
    HoldsStripped,
    /// Pregnant profile, `MODIFY` record using its override phases.
    ModifiedPhases,
}

impl EffectiveContext {
    /// Whether this context applies to a pregnant profile.
    #[must_use]
    pub fn is_pregnancy_adjusted(&self) -> bool {
        matches!(self, Self::HoldsStripped | Self::ModifiedPhases)
    }
}

/// A technique proven safe for a specific profile.
///
/// Construction goes through [`CandidateTechnique::assemble`], which
/// strips hold phases for any pregnancy-adjusted context. Hold time can
/// therefore never reach a pregnant user, whatever the originating
/// record or any later selection step says.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTechnique {
    /// Catalog id of the originating record.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category label.
    pub category: String,
    /// Suggested session length in seconds.
    pub default_duration_sec: u32,
    /// Per-phase display labels.
    pub ui_texts: UiTexts,
    /// Purpose hint for the selection prompt.
    pub purpose: Option<String>,
    /// Instruction hint for the selection prompt.
    pub instruction_clue: Option<String>,
    /// Which rule admitted this candidate.
    pub effective_context: EffectiveContext,
    phases: BreathingPhases,
}

impl CandidateTechnique {
    /// Build a candidate from a record and the phases chosen for it.
    ///
    /// Pregnancy-adjusted contexts always get `phases.without_holds()`,
    /// even if the supplied phases carry hold time.
    #[must_use]
    pub fn assemble(
        technique: &Technique,
        phases: BreathingPhases,
        effective_context: EffectiveContext,
    ) -> Self {
        let phases = if effective_context.is_pregnancy_adjusted() {
            phases.without_holds()
        } else {
            phases
        };
        Self {
            id: technique.id.clone(),
            title: technique.title.clone(),
            category: technique.category.clone(),
            default_duration_sec: technique.default_duration_sec,
            ui_texts: technique.ui_texts.clone(),
            purpose: technique.agent_config.purpose.clone(),
            instruction_clue: technique.agent_config.instruction_clue.clone(),
            effective_context,
            phases,
        }
    }

    /// The phases this candidate will be served with.
    #[must_use]
    pub fn phases(&self) -> BreathingPhases {
        self.phases
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::technique::{AgentConfig, ContextRules};

    fn record(phases: BreathingPhases) -> Technique {
        Technique {
            id: "box_breathing".into(),
            title: "Box Breathing".into(),
            category: "focus".into(),
            default_duration_sec: 180,
            phases,
            context_rules: ContextRules::default(),
            ui_texts: UiTexts::default(),
            agent_config: AgentConfig {
                purpose: Some("Steady focus".into()),
                instruction_clue: None,
            },
        }
    }

    #[test]
    fn unrestricted_keeps_holds() {
        let tech = record(BreathingPhases::new(4, 4, 4, 4));
        let candidate =
            CandidateTechnique::assemble(&tech, tech.phases, EffectiveContext::Unrestricted);
        assert_eq!(candidate.phases().hold_in_sec, 4);
        assert_eq!(candidate.phases().hold_out_sec, 4);
    }

    #[test]
    fn holds_stripped_context_zeroes_holds() {
        let tech = record(BreathingPhases::new(4, 4, 4, 4));
        let candidate =
            CandidateTechnique::assemble(&tech, tech.phases, EffectiveContext::HoldsStripped);
        assert_eq!(candidate.phases().hold_in_sec, 0);
        assert_eq!(candidate.phases().hold_out_sec, 0);
        assert_eq!(candidate.phases().inhale_sec, 4);
    }

    #[test]
    fn modified_context_zeroes_holds_in_override_too() {
        // Even an override that sneaks hold time in gets stripped.
        let tech = record(BreathingPhases::new(4, 7, 8, 0));
        let override_phases = BreathingPhases::new(4, 2, 6, 1);
        let candidate =
            CandidateTechnique::assemble(&tech, override_phases, EffectiveContext::ModifiedPhases);
        assert!(!candidate.phases().has_holds());
        assert_eq!(candidate.phases().exhale_sec, 6);
    }

    #[test]
    fn carries_prompt_hints_and_identity() {
        let tech = record(BreathingPhases::new(4, 0, 6, 0));
        let candidate =
            CandidateTechnique::assemble(&tech, tech.phases, EffectiveContext::Unrestricted);
        assert_eq!(candidate.id, "box_breathing");
        assert_eq!(candidate.purpose.as_deref(), Some("Steady focus"));
        assert_eq!(candidate.effective_context, EffectiveContext::Unrestricted);
    }
}
