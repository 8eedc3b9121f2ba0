//! `InuaServer` — Axum HTTP server.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use inua_catalog::CatalogHandle;
use inua_coach::BreathingAgent;

use crate::config::ServerConfig;
use crate::health::{self, HealthResponse};
use crate::routes;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The request pipeline.
    pub agent: Arc<BreathingAgent>,
    /// Current catalog, snapshotted per request.
    pub catalog: Arc<CatalogHandle>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// When the server started.
    pub start_time: Instant,
}

/// The main Inua server.
pub struct InuaServer {
    config: Arc<ServerConfig>,
    agent: Arc<BreathingAgent>,
    catalog: Arc<CatalogHandle>,
    start_time: Instant,
}

impl InuaServer {
    /// Create a new server.
    pub fn new(config: ServerConfig, agent: BreathingAgent, catalog: CatalogHandle) -> Self {
        Self {
            config: Arc::new(config),
            agent: Arc::new(agent),
            catalog: Arc::new(catalog),
            start_time: Instant::now(),
        }
    }

    /// Build the Axum router with all routes.
    ///
    /// CORS is deliberately permissive: the native app and local web
    /// builds call from arbitrary origins during development.
    pub fn router(&self) -> Router {
        let state = AppState {
            agent: self.agent.clone(),
            catalog: self.catalog.clone(),
            config: self.config.clone(),
            start_time: self.start_time,
        };

        Router::new()
            .route("/health", get(health_handler))
            .route("/api/agent/chat", post(routes::chat_handler))
            .route("/api/breathing/techniques", get(routes::techniques_handler))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the catalog handle (e.g. for hot reload).
    pub fn catalog(&self) -> &Arc<CatalogHandle> {
        &self.catalog
    }
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = state.catalog.snapshot();
    let resp = health::health_check(
        state.start_time,
        catalog.len(),
        catalog.meta().version.clone(),
    );
    Json(resp)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use async_trait::async_trait;
    use inua_catalog::{Catalog, MetaInfo};
    use inua_coach::orchestrator::{SelectionOptions, SelectionOrchestrator};
    use inua_core::{BreathingPhases, ContextRules, PregnancyLogic, Technique, TimeOfDay};
    use inua_guardrails::CrisisClassifier;
    use inua_llm::{CompletionProvider, CompletionRequest, ProviderResult};

    struct FixedProvider(String);

    #[async_trait]
    impl CompletionProvider for FixedProvider {
        fn model(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, _request: &CompletionRequest) -> ProviderResult<String> {
            Ok(self.0.clone())
        }
    }

    fn record(id: &str, rules: ContextRules, phases: BreathingPhases) -> Technique {
        Technique {
            id: id.into(),
            title: id.into(),
            category: "calm".into(),
            default_duration_sec: 180,
            phases,
            context_rules: rules,
            ui_texts: Default::default(),
            agent_config: Default::default(),
        }
    }

    fn test_catalog() -> Catalog {
        Catalog::new(
            MetaInfo {
                version: Some("2.0".into()),
                ..MetaInfo::default()
            },
            vec![
                record(
                    "equal_breathing",
                    ContextRules::default(),
                    BreathingPhases::new(4, 0, 4, 0),
                ),
                record(
                    "bee_breath",
                    ContextRules {
                        time_of_day: vec![TimeOfDay::Night],
                        pregnancy_logic: PregnancyLogic::Block,
                        ..ContextRules::default()
                    },
                    BreathingPhases::new(4, 0, 8, 0),
                ),
            ],
        )
    }

    fn make_server(reply: &str) -> InuaServer {
        let provider: Arc<dyn CompletionProvider> = Arc::new(FixedProvider(reply.into()));
        let agent = BreathingAgent::new(
            CrisisClassifier::new(None),
            SelectionOrchestrator::new(provider, SelectionOptions::default()),
        );
        InuaServer::new(
            ServerConfig::default(),
            agent,
            CatalogHandle::new(test_catalog()),
        )
    }

    fn chat_body(input: &str) -> Body {
        Body::from(
            serde_json::json!({
                "user_input": input,
                "user_profile": {"is_pregnant": false, "current_time": "12:00"}
            })
            .to_string(),
        )
    }

    fn post_chat(body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/agent/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_catalog() {
        let app = make_server("{}").router();
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["catalog_size"], 2);
        assert_eq!(json["catalog_version"], "2.0");
    }

    #[tokio::test]
    async fn chat_happy_path() {
        let app = make_server(
            r#"{"technique_id": "equal_breathing", "empathy_line": "I hear you.", "reason_line": "It helps."}"#,
        )
        .router();
        let resp = app.oneshot(post_chat(chat_body("feeling tense"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["suggested_technique_id"], "equal_breathing");
        assert!(json["instruction_text"].as_str().unwrap().contains("Inhale"));
        assert!(json.get("emergency_override").is_none());
    }

    #[tokio::test]
    async fn chat_crisis_returns_emergency_override() {
        let app = make_server("{}").router();
        let resp = app
            .oneshot(post_chat(chat_body("I want to kill myself")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["emergency_override"]["detected_category"], "SUICIDE");
        assert!(json.get("suggested_technique").is_none());
        assert!(json.get("message_for_user").is_none());
    }

    #[tokio::test]
    async fn chat_rejects_empty_input() {
        let app = make_server("{}").router();
        let resp = app.oneshot(post_chat(chat_body("   "))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_rejects_oversized_input() {
        let app = make_server("{}").router();
        let resp = app
            .oneshot(post_chat(chat_body(&"x".repeat(5000))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_rejects_invalid_trimester() {
        let app = make_server("{}").router();
        let body = Body::from(
            serde_json::json!({
                "user_input": "hello",
                "user_profile": {"is_pregnant": true, "trimester": 5, "current_time": "12:00"}
            })
            .to_string(),
        );
        let resp = app.oneshot(post_chat(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn techniques_day_filter_hides_night_records() {
        let app = make_server("{}").router();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/breathing/techniques")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(resp).await;
        let ids: Vec<_> = json["techniques"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["equal_breathing"]);
    }

    #[tokio::test]
    async fn techniques_pregnant_night_hides_blocked_records() {
        let app = make_server("{}").router();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/breathing/techniques?is_pregnant=true&is_night=true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(resp).await;
        let ids: Vec<_> = json["techniques"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap().to_string())
            .collect();
        // bee_breath is BLOCK for pregnancy; equal_breathing is
        // unrestricted and survives both filters.
        assert_eq!(ids, vec!["equal_breathing"]);
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = make_server("{}").router();
        let resp = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
