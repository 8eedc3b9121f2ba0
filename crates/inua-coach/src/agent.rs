//! The request pipeline: crisis gate, candidate construction, selection.
//!
//! One entry point per chat request. The crisis classifier runs first
//! and is terminal on a hit: candidate construction and selection
//! never see crisis requests, and the emergency payload carries no
//! technique fields.

use inua_catalog::{build_candidates, Catalog};
use inua_core::{AgentResponse, UserProfile};
use inua_guardrails::{build_emergency_override, CrisisClassifier};

use crate::orchestrator::SelectionOrchestrator;

/// End-to-end handler for one chat request.
pub struct BreathingAgent {
    classifier: CrisisClassifier,
    orchestrator: SelectionOrchestrator,
}

impl BreathingAgent {
    /// Assemble the pipeline from its two stages.
    #[must_use]
    pub fn new(classifier: CrisisClassifier, orchestrator: SelectionOrchestrator) -> Self {
        Self {
            classifier,
            orchestrator,
        }
    }

    /// Run one request through the full pipeline.
    pub async fn handle(
        &self,
        catalog: &Catalog,
        profile: &UserProfile,
        user_text: &str,
    ) -> AgentResponse {
        let decision = self.classifier.classify(user_text).await;
        if decision.is_crisis {
            return AgentResponse::emergency(build_emergency_override(
                decision.category,
                profile.country_code.as_deref(),
            ));
        }

        let candidates = build_candidates(profile, catalog);
        self.orchestrator.select(profile, user_text, &candidates).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
