//! Settings types.

use serde::{Deserialize, Serialize};

/// Root settings object.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InuaSettings {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Model endpoint settings.
    pub api: ApiSettings,
    /// Safety pipeline tunables.
    pub safety: SafetySettings,
    /// Catalog source settings.
    pub catalog: CatalogSettings,
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8001,
        }
    }
}

/// Model endpoint settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// OpenAI-compatible API root.
    pub base_url: String,
    /// Bearer token. Usually supplied via `IOINTELLIGENCE_API_KEY`.
    pub api_key: String,
    /// Model identifier for both selection and crisis fallback calls.
    pub model: String,
    /// Per-call deadline in milliseconds.
    pub timeout_ms: u64,
    /// Sampling temperature for selection calls.
    pub temperature: f64,
    /// Whether the model-backed crisis fallback is enabled.
    pub classifier_enabled: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.intelligence.io.solutions/api/v1".into(),
            api_key: String::new(),
            model: "meta-llama/Llama-4-Maverick-17B-128E-Instruct-FP8".into(),
            timeout_ms: 20_000,
            temperature: 0.3,
            classifier_enabled: true,
        }
    }
}

/// Safety pipeline tunables.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetySettings {
    /// Sanitizer length cap, in characters.
    pub max_input_chars: usize,
    /// Hard request-body cap for user text, in bytes. Requests over
    /// this are rejected outright rather than truncated.
    pub max_input_bytes: usize,
    /// Preferred substitute when the model proposes an unknown id.
    pub fallback_technique_id: String,
    /// Minimum session length when the user mentions sleep trouble.
    pub sleep_duration_floor_secs: u32,
}

impl Default for SafetySettings {
    fn default() -> Self {
        Self {
            max_input_chars: 500,
            max_input_bytes: 4096,
            fallback_technique_id: "equal_breathing".into(),
            sleep_duration_floor_secs: 240,
        }
    }
}

/// Catalog source settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Path to the catalog JSON document.
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: "data/breathing_db.json".into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
