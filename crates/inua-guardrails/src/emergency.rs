//! Emergency override payload construction.
//!
//! Builds the fullscreen SOS payload served instead of a technique when
//! the classifier detects a crisis, with the emergency number localized
//! by country code.

use inua_core::{ButtonAction, CrisisCategory, EmergencyButton, EmergencyOverride};

/// UI action hint understood by the client.
const SOS_UI_ACTION: &str = "show_fullscreen_sos";

/// Fallback number: the global GSM standard.
const DEFAULT_EMERGENCY_NUMBER: &str = "112";

/// Emergency number for a two-letter country code.
#[must_use]
pub fn emergency_number(country_code: Option<&str>) -> &'static str {
    match country_code.map(str::to_uppercase).as_deref() {
        Some("US" | "CA") => "911",
        Some("GB") => "999",
        Some("AU") => "000",
        Some("NZ") => "111",
        Some("TR" | "EU" | "IN") => "112",
        _ => DEFAULT_EMERGENCY_NUMBER,
    }
}

/// Build the SOS payload for a detected crisis.
///
/// `category` must be an actionable one; `NONE` is treated as a medical
/// emergency rather than producing an empty screen.
#[must_use]
pub fn build_emergency_override(
    category: CrisisCategory,
    country_code: Option<&str>,
) -> EmergencyOverride {
    let category = if category == CrisisCategory::None {
        CrisisCategory::MedicalEmergency
    } else {
        category
    };
    let number = emergency_number(country_code);

    let display_message = match category {
        CrisisCategory::Suicide => {
            "You are not alone. Please reach out for help immediately.".to_string()
        }
        _ => format!("This sounds like a medical emergency. Please call {number} immediately."),
    };

    EmergencyOverride {
        detected_category: category,
        ui_action: SOS_UI_ACTION.to_string(),
        display_message,
        buttons: vec![
            EmergencyButton {
                label: format!("Call Emergency ({number})"),
                action: ButtonAction::CallPhone,
                number: Some(number.to_string()),
            },
            EmergencyButton {
                label: "Share Location".to_string(),
                action: ButtonAction::ShareLocationWhatsapp,
                number: None,
            },
        ],
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
