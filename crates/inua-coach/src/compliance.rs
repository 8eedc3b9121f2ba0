//! Auditable compliance facts attached to each selection.
//!
//! Purely observational: the checks are computed after the response is
//! assembled and emitted to the tracing/metrics collaborators. They
//! never influence which technique is served.

use serde::Serialize;
use tracing::info;

use inua_core::{AgentResponse, UserProfile};

/// Safety-compliance facts for one served recommendation.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ComplianceFacts {
    /// Pregnant profile implies zero hold phases in the served payload.
    pub holds_zero_under_pregnancy: bool,
    /// Served technique id came from the candidate set.
    pub resolved_from_candidates: bool,
    /// Instruction text is present and non-empty.
    pub instruction_nonempty: bool,
}

impl ComplianceFacts {
    /// Compute facts for an assembled recommendation.
    #[must_use]
    pub fn check(
        profile: &UserProfile,
        response: &AgentResponse,
        resolved_from_candidates: bool,
    ) -> Self {
        let holds_zero_under_pregnancy = !profile.is_pregnant
            || response
                .suggested_technique
                .as_ref()
                .is_none_or(|t| !t.phases.has_holds());
        let instruction_nonempty = response
            .instruction_text
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());

        Self {
            holds_zero_under_pregnancy,
            resolved_from_candidates,
            instruction_nonempty,
        }
    }

    /// Whether every check passed.
    #[must_use]
    pub fn all_pass(&self) -> bool {
        self.holds_zero_under_pregnancy && self.resolved_from_candidates && self.instruction_nonempty
    }

    /// Emit the facts to the observability collaborators.
    pub fn emit(&self) {
        info!(
            holds_zero_under_pregnancy = self.holds_zero_under_pregnancy,
            resolved_from_candidates = self.resolved_from_candidates,
            instruction_nonempty = self.instruction_nonempty,
            "compliance facts"
        );
        if !self.all_pass() {
            metrics::counter!("compliance_failures_total").increment(1);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use inua_core::{BreathingPhases, TechniquePayload, UiTexts};

    fn profile(pregnant: bool) -> UserProfile {
        UserProfile {
            is_pregnant: pregnant,
            trimester: None,
            current_time: "10:00".into(),
            country_code: None,
        }
    }

    fn response(phases: BreathingPhases) -> AgentResponse {
        AgentResponse::recommendation(
            "msg".into(),
            "Inhale for 4 seconds, exhale for 4 seconds.".into(),
            TechniquePayload {
                id: "t".into(),
                title: "T".into(),
                category: String::new(),
                phases,
                ui_texts: UiTexts::default(),
                default_duration_sec: 180,
            },
            180,
        )
    }

    #[test]
    fn pregnant_with_zero_holds_passes() {
        let facts = ComplianceFacts::check(
            &profile(true),
            &response(BreathingPhases::new(4, 0, 6, 0)),
            true,
        );
        assert!(facts.all_pass());
    }

    #[test]
    fn pregnant_with_holds_fails_the_hold_check() {
        let facts = ComplianceFacts::check(
            &profile(true),
            &response(BreathingPhases::new(4, 4, 4, 4)),
            true,
        );
        assert!(!facts.holds_zero_under_pregnancy);
        assert!(!facts.all_pass());
    }

    #[test]
    fn non_pregnant_holds_are_fine() {
        let facts = ComplianceFacts::check(
            &profile(false),
            &response(BreathingPhases::new(4, 4, 4, 4)),
            true,
        );
        assert!(facts.holds_zero_under_pregnancy);
    }

    #[test]
    fn message_only_response_counts_as_zero_holds() {
        let facts = ComplianceFacts::check(
            &profile(true),
            &AgentResponse::message_only("calm".into(), 180),
            false,
        );
        assert!(facts.holds_zero_under_pregnancy);
        assert!(!facts.instruction_nonempty);
    }
}
