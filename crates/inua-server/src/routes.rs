//! Request handlers for the chat and technique-listing endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use inua_catalog::build_candidates;
use inua_core::{AgentResponse, TechniquePayload, UserProfile};

use crate::server::AppState;

/// Body of `POST /api/agent/chat`.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatRequest {
    /// Free-text user message.
    pub user_input: String,
    /// Structured user context.
    pub user_profile: UserProfile,
}

/// Error body for rejected requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub error: String,
}

/// Query of `GET /api/breathing/techniques`.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct TechniquesQuery {
    /// Apply pregnancy filtering/modification.
    #[serde(default)]
    pub is_pregnant: bool,
    /// Filter to night-appropriate techniques.
    #[serde(default)]
    pub is_night: bool,
}

/// Body of `GET /api/breathing/techniques`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TechniquesResponse {
    /// Context-filtered techniques, in catalog order.
    pub techniques: Vec<TechniquePayload>,
}

type Rejection = (StatusCode, Json<ErrorBody>);

fn reject(status: StatusCode, error: impl Into<String>) -> Rejection {
    (
        status,
        Json(ErrorBody {
            error: error.into(),
        }),
    )
}

/// POST /api/agent/chat
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<AgentResponse>, Rejection> {
    let request_id = Uuid::new_v4();

    if request.user_input.trim().is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "user_input must not be empty"));
    }
    if request.user_input.len() > state.config.max_input_bytes {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            format!(
                "user_input exceeds {} bytes",
                state.config.max_input_bytes
            ),
        ));
    }
    if let Err(e) = request.user_profile.validate() {
        return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()));
    }

    info!(
        %request_id,
        is_pregnant = request.user_profile.is_pregnant,
        input_chars = request.user_input.chars().count(),
        "chat request"
    );

    let catalog = state.catalog.snapshot();
    let response = state
        .agent
        .handle(&catalog, &request.user_profile, &request.user_input)
        .await;

    info!(%request_id, emergency = response.is_emergency(), "chat response");
    Ok(Json(response))
}

/// GET /api/breathing/techniques
///
/// The normalizer applied with a synthetic profile built from the query
/// flags; `BLOCK` records never appear for pregnant callers and
/// `MODIFY` records are returned with their override phases.
pub async fn techniques_handler(
    State(state): State<AppState>,
    Query(query): Query<TechniquesQuery>,
) -> Json<TechniquesResponse> {
    let profile = UserProfile {
        is_pregnant: query.is_pregnant,
        trimester: None,
        current_time: if query.is_night { "23:00" } else { "12:00" }.into(),
        country_code: None,
    };

    let catalog = state.catalog.snapshot();
    let techniques = build_candidates(&profile, &catalog)
        .into_iter()
        .map(|c| TechniquePayload {
            id: c.id.clone(),
            title: c.title.clone(),
            category: c.category.clone(),
            phases: c.phases(),
            ui_texts: c.ui_texts.clone(),
            default_duration_sec: c.default_duration_sec,
        })
        .collect();

    Json(TechniquesResponse { techniques })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests (full-router coverage lives in server.rs)
// ─────────────────────────────────────────────────────────────────────────────
