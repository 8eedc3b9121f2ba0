//! The context normalizer: catalog records → per-profile candidates.
//!
//! For pregnant profiles the resulting candidates can never carry hold
//! time, whatever the record says: `BLOCK` records are excluded, `MODIFY`
//! records use their override phases, and everything else keeps its
//! phases with holds forced to zero. [`CandidateTechnique::assemble`]
//! re-applies the zeroing, so the guarantee does not depend on this
//! module alone.

use tracing::debug;

use inua_core::{
    CandidateTechnique, EffectiveContext, PregnancyLogic, Technique, UserProfile,
};

use crate::table::Catalog;

/// Reshape one record for `profile`, or exclude it.
#[must_use]
pub fn normalize(profile: &UserProfile, technique: &Technique) -> Option<CandidateTechnique> {
    let period = profile.time_period();
    if !technique.context_rules.allows_time(period) {
        debug!(technique = %technique.id, period = %period, "excluded by time rule");
        return None;
    }

    if !profile.is_pregnant {
        return Some(CandidateTechnique::assemble(
            technique,
            technique.phases,
            EffectiveContext::Unrestricted,
        ));
    }

    match technique.context_rules.pregnancy_logic {
        PregnancyLogic::Block => {
            debug!(
                technique = %technique.id,
                alternative = technique.context_rules.pregnancy_alternative_id.as_deref(),
                "excluded for pregnancy"
            );
            None
        }
        PregnancyLogic::Modify => {
            // The loader guarantees override phases for MODIFY records;
            // a record without them is treated as blocked anyway.
            let phases = technique.context_rules.pregnancy_mod_phases?;
            Some(CandidateTechnique::assemble(
                technique,
                phases,
                EffectiveContext::ModifiedPhases,
            ))
        }
        PregnancyLogic::Safe => Some(CandidateTechnique::assemble(
            technique,
            technique.phases,
            EffectiveContext::HoldsStripped,
        )),
    }
}

/// Apply [`normalize`] across the whole catalog.
///
/// Preserves catalog order, never duplicates, and is deterministic for
/// a given profile and catalog.
#[must_use]
pub fn build_candidates(profile: &UserProfile, catalog: &Catalog) -> Vec<CandidateTechnique> {
    catalog
        .techniques()
        .iter()
        .filter_map(|t| normalize(profile, t))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
