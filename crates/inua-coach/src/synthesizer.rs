//! Deterministic instruction rendering.
//!
//! The only place timing instructions are worded. Narrative model
//! output never describes breath-holding; whatever the model says, the
//! user reads instructions derived from the already-normalized phases.

use inua_core::BreathingPhases;

/// Render user-facing instructions for one breathing cycle.
///
/// Inhale and exhale steps are always present; hold steps appear only
/// when their phase is nonzero.
#[must_use]
pub fn render_instructions(phases: BreathingPhases) -> String {
    let mut steps = Vec::with_capacity(4);
    steps.push(format!(
        "Inhale through your nose for {}",
        seconds_phrase(phases.inhale_sec)
    ));
    if phases.hold_in_sec > 0 {
        steps.push(format!("hold for {}", seconds_phrase(phases.hold_in_sec)));
    }
    steps.push(format!(
        "exhale through your mouth for {}",
        seconds_phrase(phases.exhale_sec)
    ));
    if phases.hold_out_sec > 0 {
        steps.push(format!(
            "hold again for {}",
            seconds_phrase(phases.hold_out_sec)
        ));
    }

    let mut text = steps.join(", ");
    text.push_str(". Repeat gently until the timer ends.");
    text
}

fn seconds_phrase(n: u32) -> String {
    if n == 1 {
        "1 second".to_string()
    } else {
        format!("{n} seconds")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
