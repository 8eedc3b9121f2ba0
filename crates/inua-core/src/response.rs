//! Wire-format response types for the agent chat endpoint.
//!
//! A response is either a technique recommendation or an emergency
//! override, never both. Construction goes through the constructors
//! below, which populate exactly one side.

use serde::{Deserialize, Serialize};

use crate::crisis::CrisisCategory;
use crate::phases::{BreathingPhases, UiTexts};

/// Full technique payload echoed back to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniquePayload {
    /// Technique id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category label.
    pub category: String,
    /// Phases the client should animate. Already context-normalized.
    pub phases: BreathingPhases,
    /// Per-phase display labels.
    pub ui_texts: UiTexts,
    /// Suggested session length in seconds.
    pub default_duration_sec: u32,
}

/// Action bound to an emergency button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Dial the attached number.
    CallPhone,
    /// Share live location over WhatsApp.
    ShareLocationWhatsapp,
}

/// One button on the fullscreen SOS view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyButton {
    /// Button label.
    pub label: String,
    /// What tapping the button does.
    pub action: ButtonAction,
    /// Phone number for `call_phone` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

/// Emergency payload replacing the normal recommendation fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyOverride {
    /// Crisis category that triggered the override.
    pub detected_category: CrisisCategory,
    /// UI action hint. Always `"show_fullscreen_sos"`.
    pub ui_action: String,
    /// Message shown on the SOS screen.
    pub display_message: String,
    /// Action buttons.
    pub buttons: Vec<EmergencyButton>,
}

/// Response body of `POST /api/agent/chat`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Narrative message for the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_for_user: Option<String>,
    /// Deterministic timing instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_text: Option<String>,
    /// Id of the recommended technique.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_technique_id: Option<String>,
    /// Full payload of the recommended technique.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_technique: Option<TechniquePayload>,
    /// Session duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    /// Emergency payload. Present only on the crisis path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_override: Option<EmergencyOverride>,
}

impl AgentResponse {
    /// A full technique recommendation.
    #[must_use]
    pub fn recommendation(
        message_for_user: String,
        instruction_text: String,
        technique: TechniquePayload,
        duration_seconds: u32,
    ) -> Self {
        Self {
            message_for_user: Some(message_for_user),
            instruction_text: Some(instruction_text),
            suggested_technique_id: Some(technique.id.clone()),
            suggested_technique: Some(technique),
            duration_seconds: Some(duration_seconds),
            emergency_override: None,
        }
    }

    /// A message-only response with no technique attached.
    #[must_use]
    pub fn message_only(message_for_user: String, duration_seconds: u32) -> Self {
        Self {
            message_for_user: Some(message_for_user),
            duration_seconds: Some(duration_seconds),
            ..Self::default()
        }
    }

    /// An emergency override response. Clears every normal field.
    #[must_use]
    pub fn emergency(payload: EmergencyOverride) -> Self {
        Self {
            emergency_override: Some(payload),
            ..Self::default()
        }
    }

    /// Whether this is an emergency override response.
    #[must_use]
    pub fn is_emergency(&self) -> bool {
        self.emergency_override.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> TechniquePayload {
        TechniquePayload {
            id: "equal_breathing".into(),
            title: "Equal Breathing".into(),
            category: "calm".into(),
            phases: BreathingPhases::new(4, 0, 4, 0),
            ui_texts: UiTexts::default(),
            default_duration_sec: 180,
        }
    }

    #[test]
    fn recommendation_populates_normal_side_only() {
        let resp = AgentResponse::recommendation(
            "You're safe here.".into(),
            "Inhale for 4 seconds, then exhale for 4 seconds.".into(),
            payload(),
            180,
        );
        assert!(!resp.is_emergency());
        assert_eq!(resp.suggested_technique_id.as_deref(), Some("equal_breathing"));
        assert!(resp.emergency_override.is_none());
    }

    #[test]
    fn emergency_populates_override_side_only() {
        let resp = AgentResponse::emergency(EmergencyOverride {
            detected_category: CrisisCategory::Suicide,
            ui_action: "show_fullscreen_sos".into(),
            display_message: "You are not alone.".into(),
            buttons: vec![],
        });
        assert!(resp.is_emergency());
        assert!(resp.message_for_user.is_none());
        assert!(resp.suggested_technique.is_none());
        assert!(resp.duration_seconds.is_none());
    }

    #[test]
    fn serialization_omits_absent_side() {
        let resp = AgentResponse::message_only("Let me help you relax.".into(), 180);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["message_for_user"], "Let me help you relax.");
        assert!(json.get("emergency_override").is_none());
        assert!(json.get("suggested_technique").is_none());
    }

    #[test]
    fn button_action_serde_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&ButtonAction::ShareLocationWhatsapp).unwrap(),
            "\"share_location_whatsapp\""
        );
    }
}
