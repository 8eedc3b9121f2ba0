//! Selection prompt construction.
//!
//! The prompt embeds only the already-normalized candidate set. The
//! model picks an id and writes two short narrative lines; it is
//! explicitly forbidden from choosing outside the list and from
//! describing how to perform a technique; performing instructions are
//! rendered deterministically elsewhere.

use inua_core::{CandidateTechnique, EffectiveContext, UserProfile};

/// Build the system instructions for one selection call.
#[must_use]
pub fn build_selection_prompt(profile: &UserProfile, candidates: &[CandidateTechnique]) -> String {
    let mut prompt = String::from(
        "You are 'Inua', an expert somatic breath coach. Analyze the user's \
         emotional state and select the best matching breathing technique from \
         the available list.\n\n",
    );

    prompt.push_str("### USER CONTEXT\n");
    prompt.push_str(&format!(
        "- Pregnant: {} (CRITICAL: if true, no breath holding is allowed)\n",
        profile.is_pregnant
    ));
    prompt.push_str(&format!("- Local time: {}\n\n", profile.current_time));

    prompt.push_str("### AVAILABLE TECHNIQUES\n");
    for candidate in candidates {
        prompt.push_str(&render_candidate(candidate));
    }

    prompt.push_str(
        "\n### RULES\n\
         1. Choose exactly one technique_id from the list above. Never invent \
         an id and never pick one that is not listed.\n\
         2. Do not describe how to perform the technique and do not mention \
         timing or breath holds; the app renders instructions itself.\n\
         3. Keep both lines short and warm.\n\n\
         ### OUTPUT FORMAT (JSON ONLY)\n\
         Return ONLY the raw JSON object. No markdown fences, no extra text.\n\
         {\n\
         \x20 \"thought_process\": \"Brief reasoning about the user's state and your pick.\",\n\
         \x20 \"technique_id\": \"exact_id_from_list\",\n\
         \x20 \"empathy_line\": \"A warm, short sentence validating their feeling.\",\n\
         \x20 \"reason_line\": \"One sentence on why this technique helps.\"\n\
         }\n",
    );

    prompt
}

fn render_candidate(candidate: &CandidateTechnique) -> String {
    let purpose = candidate
        .purpose
        .as_deref()
        .unwrap_or("General relaxation");
    let mut clue = candidate
        .instruction_clue
        .clone()
        .unwrap_or_default();
    if candidate.effective_context == EffectiveContext::ModifiedPhases {
        clue = format!("[MODIFIED FOR PREGNANCY - no breath holding] {clue}");
    }
    format!(
        "- ID: {} | Name: {}\n  Purpose: {}\n  Hint: {}\n",
        candidate.id, candidate.title, purpose, clue
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use inua_core::{BreathingPhases, Technique};

    fn profile(pregnant: bool) -> UserProfile {
        UserProfile {
            is_pregnant: pregnant,
            trimester: None,
            current_time: "22:15".into(),
            country_code: None,
        }
    }

    fn candidate(id: &str, context: EffectiveContext) -> CandidateTechnique {
        let tech = Technique {
            id: id.into(),
            title: "Box Breathing".into(),
            category: "focus".into(),
            default_duration_sec: 180,
            phases: BreathingPhases::new(4, 4, 4, 4),
            context_rules: Default::default(),
            ui_texts: Default::default(),
            agent_config: inua_core::AgentConfig {
                purpose: Some("Steady a racing mind".into()),
                instruction_clue: Some("Even square rhythm".into()),
            },
        };
        CandidateTechnique::assemble(&tech, tech.phases, context)
    }

    #[test]
    fn embeds_every_candidate_id() {
        let candidates = vec![
            candidate("box_breathing", EffectiveContext::Unrestricted),
            candidate("equal_breathing", EffectiveContext::Unrestricted),
        ];
        let prompt = build_selection_prompt(&profile(false), &candidates);
        assert!(prompt.contains("ID: box_breathing"));
        assert!(prompt.contains("ID: equal_breathing"));
        assert!(prompt.contains("Purpose: Steady a racing mind"));
    }

    #[test]
    fn states_pregnancy_context() {
        let prompt = build_selection_prompt(
            &profile(true),
            &[candidate("box_breathing", EffectiveContext::HoldsStripped)],
        );
        assert!(prompt.contains("Pregnant: true"));
    }

    #[test]
    fn marks_modified_candidates() {
        let prompt = build_selection_prompt(
            &profile(true),
            &[candidate("4_7_8_sleep", EffectiveContext::ModifiedPhases)],
        );
        assert!(prompt.contains("[MODIFIED FOR PREGNANCY"));
    }

    #[test]
    fn forbids_out_of_list_ids_and_howto() {
        let prompt = build_selection_prompt(
            &profile(false),
            &[candidate("box_breathing", EffectiveContext::Unrestricted)],
        );
        assert!(prompt.contains("never pick one that is not listed"));
        assert!(prompt.contains("Do not describe how to perform"));
        assert!(prompt.contains("JSON ONLY"));
    }
}
