//! Two-stage crisis classification.
//!
//! Stage one is the keyword matcher: fast, deterministic, and
//! authoritative. A hit never reaches the model and can never be
//! overridden. Stage two sends sanitized text to the completion
//! provider under a fixed JSON contract. The fallback fails closed for
//! crisis override and open for normal flow: an unclassifiable input is
//! treated as non-crisis, but a keyword hit is already terminal by the
//! time the model could disagree.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use inua_core::{CrisisCategory, CrisisDecision, DetectionMethod};
use inua_llm::{parse_object, CompletionProvider, CompletionRequest};

/// Fixed instruction contract for the fallback classifier call.
const CLASSIFIER_INSTRUCTIONS: &str = "You are a crisis triage classifier for a breathing \
coach app. Decide whether the user message indicates an acute crisis.\n\
Return ONLY a raw JSON object, no markdown, no commentary:\n\
{\"is_crisis\": true|false, \"category\": \"SUICIDE\"|\"MEDICAL_EMERGENCY\"|\"NONE\"}\n\
SUICIDE covers self-harm intent. MEDICAL_EMERGENCY covers acute physical \
emergencies. Everything else, including ordinary anxiety or sadness, is NONE.";

/// The two-stage crisis classifier.
pub struct CrisisClassifier {
    matcher: Box<dyn crate::keywords::CrisisMatcher>,
    fallback: Option<Arc<dyn CompletionProvider>>,
    sanitizer: crate::sanitize::TextSanitizer,
}

impl CrisisClassifier {
    /// Classifier with the default keyword lists and a model fallback.
    #[must_use]
    pub fn new(fallback: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self {
            matcher: Box::new(crate::keywords::KeywordMatcher),
            fallback,
            sanitizer: crate::sanitize::TextSanitizer::default(),
        }
    }

    /// Replace the keyword stage, e.g. with a locale-aware matcher.
    #[must_use]
    pub fn with_matcher(mut self, matcher: Box<dyn crate::keywords::CrisisMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Classify one request's user text.
    ///
    /// Never fails: classifier errors of any kind degrade to a clear
    /// decision.
    pub async fn classify(&self, user_text: &str) -> CrisisDecision {
        let start = Instant::now();

        if let Some(category) = self.matcher.match_category(user_text) {
            let decision = CrisisDecision::crisis(category);
            record_decision(decision, DetectionMethod::Keyword, start);
            return decision;
        }

        let decision = match &self.fallback {
            Some(provider) => self.classify_with_model(provider.as_ref(), user_text).await,
            None => CrisisDecision::clear(),
        };
        record_decision(decision, DetectionMethod::Model, start);
        decision
    }

    async fn classify_with_model(
        &self,
        provider: &dyn CompletionProvider,
        user_text: &str,
    ) -> CrisisDecision {
        // Raw text never reaches a prompt; the keyword stage already ran
        // on the original input.
        let sanitized = self.sanitizer.sanitize(user_text);
        let request =
            CompletionRequest::new(CLASSIFIER_INSTRUCTIONS, sanitized).with_temperature(0.0);

        let raw = match provider.complete(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    category = e.category(),
                    error = %e,
                    "crisis fallback call failed, treating as non-crisis"
                );
                metrics::counter!("crisis_fallback_failures_total", "kind" => "call")
                    .increment(1);
                return CrisisDecision::clear();
            }
        };

        let Some(object) = parse_object(&raw) else {
            warn!("crisis fallback reply unparseable, treating as non-crisis");
            metrics::counter!("crisis_fallback_failures_total", "kind" => "parse").increment(1);
            return CrisisDecision::clear();
        };

        let is_crisis = object
            .get("is_crisis")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        let category = object
            .get("category")
            .and_then(serde_json::Value::as_str)
            .map_or(CrisisCategory::None, parse_category);

        CrisisDecision::reconcile(is_crisis, category)
    }
}

/// Map a raw category string onto the enum, coercing anything
/// unrecognized to `NONE`.
fn parse_category(raw: &str) -> CrisisCategory {
    match raw {
        "SUICIDE" => CrisisCategory::Suicide,
        "MEDICAL_EMERGENCY" => CrisisCategory::MedicalEmergency,
        _ => CrisisCategory::None,
    }
}

/// Observability only; the decision is already made.
fn record_decision(decision: CrisisDecision, method: DetectionMethod, start: Instant) {
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        is_crisis = decision.is_crisis,
        category = %decision.category,
        method = %method,
        latency_ms,
        "crisis decision"
    );
    metrics::counter!(
        "crisis_decisions_total",
        "method" => method.to_string(),
        "category" => decision.category.to_string()
    )
    .increment(1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
