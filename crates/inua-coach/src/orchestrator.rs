//! Selection orchestration around the model call.
//!
//! Candidates arrive already safety-normalized; the model only ever
//! ranks them. Its reply is advisory: the id is resolved back onto the
//! candidate set deterministically, and every failure mode (no
//! candidates, call failure, unparseable reply) degrades to a calm
//! generic message instead of erroring.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use inua_core::{
    AgentResponse, CandidateTechnique, EffectiveContext, TechniquePayload, UserProfile,
};
use inua_guardrails::TextSanitizer;
use inua_llm::{parse_object, CompletionProvider, CompletionRequest};

use crate::compliance::ComplianceFacts;
use crate::prompt::build_selection_prompt;
use crate::synthesizer::render_instructions;
use crate::validate::SelectionResult;

/// Served when the candidate set is empty. No model call is made.
const NO_CANDIDATES_MESSAGE: &str = "Let's take a gentle moment together. Breathe in \
slowly through your nose, and let it out even slower. I'm right here with you.";

/// Served when the model call fails or its reply is unusable.
const DEGRADED_MESSAGE: &str = "I'm having a little trouble finding the right words \
right now, but we can still slow things down together. Breathe in gently, and let \
your exhale be long and soft.";

/// Narrative defaults when the model omits a line.
const DEFAULT_EMPATHY_LINE: &str = "I'm here to help you feel better.";
const DEFAULT_REASON_LINE: &str = "This breathing technique will help you relax.";

/// Appended when the served phases were rewritten for pregnancy.
const PREGNANCY_SAFETY_NOTE: &str =
    "\n\n_For your safety, I've removed breath-holding from this technique._";

/// Duration served with message-only responses.
const DEFAULT_DURATION_SECS: u32 = 180;

/// Tunables for the selection step.
#[derive(Clone, Debug)]
pub struct SelectionOptions {
    /// Preferred substitute when the model proposes an unknown id.
    pub fallback_technique_id: String,
    /// Minimum session length when the user mentions sleep trouble.
    pub sleep_duration_floor_secs: u32,
    /// Sampling temperature for the selection call.
    pub temperature: f64,
    /// Length cap applied by the sanitizer.
    pub max_input_chars: usize,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            fallback_technique_id: "equal_breathing".into(),
            sleep_duration_floor_secs: 240,
            temperature: 0.3,
            max_input_chars: inua_guardrails::sanitize::DEFAULT_MAX_CHARS,
        }
    }
}

/// How one selection run ended. Observability only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Selected,
    NoCandidates,
    ModelUnavailable,
    ParseFailure,
}

impl Outcome {
    fn label(self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::NoCandidates => "no_candidates",
            Self::ModelUnavailable => "model_unavailable",
            Self::ParseFailure => "parse_failure",
        }
    }
}

/// Orchestrates one selection per request.
pub struct SelectionOrchestrator {
    provider: Arc<dyn CompletionProvider>,
    sanitizer: TextSanitizer,
    options: SelectionOptions,
}

impl SelectionOrchestrator {
    /// Build an orchestrator over a completion provider.
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>, options: SelectionOptions) -> Self {
        let sanitizer = TextSanitizer::new(options.max_input_chars);
        Self {
            provider,
            sanitizer,
            options,
        }
    }

    /// Select a technique for this request and assemble the response.
    ///
    /// Never fails and never panics: every branch produces a renderable
    /// [`AgentResponse`].
    pub async fn select(
        &self,
        profile: &UserProfile,
        user_text: &str,
        candidates: &[CandidateTechnique],
    ) -> AgentResponse {
        let start = Instant::now();
        let (outcome, response) = self.run(profile, user_text, candidates).await;

        let resolved_from_candidates = outcome == Outcome::Selected;
        let facts = ComplianceFacts::check(profile, &response, resolved_from_candidates);
        facts.emit();

        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            outcome = outcome.label(),
            technique = response.suggested_technique_id.as_deref(),
            latency_ms,
            "selection complete"
        );
        metrics::counter!("selections_total", "outcome" => outcome.label()).increment(1);

        response
    }

    async fn run(
        &self,
        profile: &UserProfile,
        user_text: &str,
        candidates: &[CandidateTechnique],
    ) -> (Outcome, AgentResponse) {
        if candidates.is_empty() {
            return (
                Outcome::NoCandidates,
                AgentResponse::message_only(NO_CANDIDATES_MESSAGE.into(), DEFAULT_DURATION_SECS),
            );
        }

        let sanitized = self.sanitizer.sanitize(user_text);
        let request = CompletionRequest::new(
            build_selection_prompt(profile, candidates),
            sanitized.clone(),
        )
        .with_temperature(self.options.temperature);

        let raw = match self.provider.complete(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(category = e.category(), error = %e, "selection call failed");
                return (
                    Outcome::ModelUnavailable,
                    AgentResponse::message_only(DEGRADED_MESSAGE.into(), DEFAULT_DURATION_SECS),
                );
            }
        };

        let Some(object) = parse_object(&raw) else {
            warn!("selection reply carried no usable JSON object");
            return (
                Outcome::ParseFailure,
                AgentResponse::message_only(DEGRADED_MESSAGE.into(), DEFAULT_DURATION_SECS),
            );
        };

        let selection = SelectionResult::from_object(&object);
        let candidate = self.resolve(selection.technique_id.as_deref(), candidates);
        let response = self.assemble(&sanitized, candidate, &selection);
        (Outcome::Selected, response)
    }

    /// Resolve the advisory id onto the candidate set.
    ///
    /// Exact match wins; otherwise the configured fallback id if it is
    /// among the candidates; otherwise the first candidate.
    fn resolve<'a>(
        &self,
        proposed: Option<&str>,
        candidates: &'a [CandidateTechnique],
    ) -> &'a CandidateTechnique {
        if let Some(id) = proposed {
            if let Some(candidate) = candidates.iter().find(|c| c.id == id) {
                return candidate;
            }
            warn!(proposed = id, "model proposed an id outside the candidate set");
            metrics::counter!("selection_id_fallbacks_total").increment(1);
        }
        candidates
            .iter()
            .find(|c| c.id == self.options.fallback_technique_id)
            .unwrap_or(&candidates[0])
    }

    fn assemble(
        &self,
        sanitized_input: &str,
        candidate: &CandidateTechnique,
        selection: &SelectionResult,
    ) -> AgentResponse {
        let instruction_text = render_instructions(candidate.phases());
        let payload = TechniquePayload {
            id: candidate.id.clone(),
            title: candidate.title.clone(),
            category: candidate.category.clone(),
            phases: candidate.phases(),
            ui_texts: candidate.ui_texts.clone(),
            default_duration_sec: candidate.default_duration_sec,
        };

        let empathy = selection
            .empathy_line
            .as_deref()
            .unwrap_or(DEFAULT_EMPATHY_LINE);
        let reason = selection
            .reason_line
            .as_deref()
            .unwrap_or(DEFAULT_REASON_LINE);

        let mut message = format!("{empathy} {reason}");
        if candidate.effective_context == EffectiveContext::ModifiedPhases {
            message.push_str(PREGNANCY_SAFETY_NOTE);
        }
        message.push_str(&format!("\n\n**{}**\n{}", candidate.title, instruction_text));

        let duration = self.adjusted_duration(sanitized_input, candidate.default_duration_sec);
        AgentResponse::recommendation(message, instruction_text, payload, duration)
    }

    /// Extend the session when the input suggests sleep trouble.
    fn adjusted_duration(&self, sanitized_input: &str, default: u32) -> u32 {
        let lower = sanitized_input.to_lowercase();
        if lower.contains("sleep") || lower.contains("insomnia") {
            default.max(self.options.sleep_duration_floor_secs)
        } else {
            default
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
