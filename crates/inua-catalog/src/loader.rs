//! Catalog loading and load-time rule normalization.
//!
//! The source document is `{meta_info, techniques: [...]}`. Loading
//! never fails the process: an unreadable or malformed file yields an
//! empty catalog, and a malformed record is dropped rather than
//! poisoning the rest of the document.
//!
//! Pregnancy rules are normalized here so the in-memory table is
//! trustworthy on its own:
//! - unrecognized `pregnancy_logic` values downgrade to `BLOCK`
//! - `MODIFY` without override phases downgrades to `BLOCK`
//! - hold time inside override phases is zeroed

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use inua_core::{
    AgentConfig, BreathingPhases, ContextRules, PregnancyLogic, Technique, TimeOfDay, UiTexts,
};

use crate::table::{Catalog, MetaInfo};

/// Lenient mirror of a catalog record, tolerant of unknown rule values.
#[derive(Debug, Deserialize)]
struct RawTechnique {
    id: String,
    title: String,
    #[serde(default)]
    category: String,
    #[serde(default = "default_duration")]
    default_duration_sec: u32,
    phases: BreathingPhases,
    #[serde(default)]
    context_rules: RawContextRules,
    #[serde(default)]
    ui_texts: UiTexts,
    #[serde(default)]
    agent_config: AgentConfig,
}

fn default_duration() -> u32 {
    180
}

#[derive(Debug, Default, Deserialize)]
struct RawContextRules {
    #[serde(default)]
    time_of_day: Option<Vec<String>>,
    #[serde(default)]
    pregnancy_logic: Option<String>,
    #[serde(default)]
    pregnancy_mod_phases: Option<BreathingPhases>,
    #[serde(default)]
    pregnancy_alternative_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCatalogDoc {
    #[serde(default)]
    meta_info: MetaInfo,
    #[serde(default)]
    techniques: Vec<Value>,
}

/// Load and validate a catalog from a JSON file.
///
/// Falls back to an empty catalog on any read or parse failure.
pub fn load_catalog(path: &Path) -> Catalog {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "catalog unreadable, starting empty");
            return Catalog::default();
        }
    };
    load_catalog_from_str(&content)
}

/// Load and validate a catalog from a JSON string.
pub fn load_catalog_from_str(content: &str) -> Catalog {
    let doc: RawCatalogDoc = match serde_json::from_str(content) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "catalog document malformed, starting empty");
            return Catalog::default();
        }
    };

    let mut seen = HashSet::new();
    let mut techniques = Vec::with_capacity(doc.techniques.len());
    for raw in doc.techniques {
        let Some(technique) = validate_record(raw) else {
            continue;
        };
        if !seen.insert(technique.id.clone()) {
            warn!(technique = %technique.id, "duplicate id, keeping first occurrence");
            continue;
        }
        techniques.push(technique);
    }

    info!(
        count = techniques.len(),
        version = doc.meta_info.version.as_deref(),
        language = doc.meta_info.language.as_deref(),
        "catalog loaded"
    );
    Catalog::new(doc.meta_info, techniques)
}

/// Validate one raw record, or drop it.
fn validate_record(raw: Value) -> Option<Technique> {
    let raw: RawTechnique = match serde_json::from_value(raw) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "dropping malformed catalog record");
            return None;
        }
    };

    let time_of_day = normalize_time_of_day(&raw.id, raw.context_rules.time_of_day)?;
    let (pregnancy_logic, pregnancy_mod_phases) = normalize_pregnancy_rule(
        &raw.id,
        raw.context_rules.pregnancy_logic.as_deref(),
        raw.context_rules.pregnancy_mod_phases,
    );

    Some(Technique {
        id: raw.id,
        title: raw.title,
        category: raw.category,
        default_duration_sec: raw.default_duration_sec,
        phases: raw.phases,
        context_rules: ContextRules {
            time_of_day,
            pregnancy_logic,
            pregnancy_mod_phases,
            pregnancy_alternative_id: raw.context_rules.pregnancy_alternative_id,
        },
        ui_texts: raw.ui_texts,
        agent_config: raw.agent_config,
    })
}

/// Map raw time tokens to typed values.
///
/// Unknown tokens are dropped. A list that had entries but lost all of
/// them would match no time at all, so the record is dropped instead of
/// silently becoming unrestricted.
fn normalize_time_of_day(id: &str, raw: Option<Vec<String>>) -> Option<Vec<TimeOfDay>> {
    let Some(raw) = raw else {
        return Some(Vec::new());
    };
    let had_entries = !raw.is_empty();
    let parsed: Vec<TimeOfDay> = raw
        .into_iter()
        .filter_map(|token| match token.as_str() {
            "day" => Some(TimeOfDay::Day),
            "night" => Some(TimeOfDay::Night),
            "any" => Some(TimeOfDay::Any),
            other => {
                warn!(technique = id, token = other, "unknown time_of_day token dropped");
                None
            }
        })
        .collect();
    if had_entries && parsed.is_empty() {
        warn!(technique = id, "no recognized time_of_day tokens, dropping record");
        return None;
    }
    Some(parsed)
}

/// Normalize the pregnancy rule, downgrading to `BLOCK` whenever the
/// record cannot be trusted.
fn normalize_pregnancy_rule(
    id: &str,
    logic: Option<&str>,
    mod_phases: Option<BreathingPhases>,
) -> (PregnancyLogic, Option<BreathingPhases>) {
    let logic = match logic {
        None | Some("SAFE") => PregnancyLogic::Safe,
        Some("BLOCK") => PregnancyLogic::Block,
        Some("MODIFY") => PregnancyLogic::Modify,
        Some(other) => {
            warn!(
                technique = id,
                value = other,
                "unrecognized pregnancy_logic, downgrading to BLOCK"
            );
            PregnancyLogic::Block
        }
    };

    match logic {
        PregnancyLogic::Modify => match mod_phases {
            Some(phases) if phases.has_holds() => {
                warn!(
                    technique = id,
                    "override phases carried hold time, zeroing holds"
                );
                (PregnancyLogic::Modify, Some(phases.without_holds()))
            }
            Some(phases) => (PregnancyLogic::Modify, Some(phases)),
            None => {
                warn!(
                    technique = id,
                    "MODIFY without override phases, downgrading to BLOCK"
                );
                (PregnancyLogic::Block, None)
            }
        },
        other => (other, mod_phases),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
