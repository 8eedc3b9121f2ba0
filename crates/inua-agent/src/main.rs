//! # inua-agent
//!
//! Inua server binary — wires settings, the technique catalog, the
//! model provider, and the HTTP server together.

#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use inua_catalog::{load_catalog, CatalogHandle};
use inua_coach::orchestrator::{SelectionOptions, SelectionOrchestrator};
use inua_coach::BreathingAgent;
use inua_guardrails::CrisisClassifier;
use inua_llm::{CompletionProvider, OpenAiCompatConfig, OpenAiCompatProvider};
use inua_server::{InuaServer, ServerConfig};
use inua_settings::{load_settings, load_settings_from_path, InuaSettings};

/// Inua breathing coach server.
#[derive(Parser, Debug)]
#[command(name = "inua-agent", about = "Inua breathing coach server")]
struct Cli {
    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides settings).
    #[arg(long)]
    port: Option<u16>,

    /// Path to the catalog JSON document (overrides settings).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Path to a settings file (default `~/.inua/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = match &cli.settings {
        Some(path) => load_settings_from_path(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => load_settings().context("failed to load settings")?,
    };
    apply_cli_overrides(&mut settings, &cli);

    if settings.api.api_key.is_empty() {
        warn!("no API key configured; model calls will degrade to generic responses");
    }

    let catalog = load_catalog(Path::new(&settings.catalog.path));
    if catalog.is_empty() {
        warn!(path = %settings.catalog.path, "catalog is empty; only generic responses will be served");
    }

    let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAiCompatProvider::new(
        OpenAiCompatConfig::new(
            settings.api.base_url.clone(),
            settings.api.api_key.clone(),
            settings.api.model.clone(),
        )
        .with_timeout(Duration::from_millis(settings.api.timeout_ms)),
    ));

    let classifier = CrisisClassifier::new(
        settings
            .api
            .classifier_enabled
            .then(|| Arc::clone(&provider)),
    );
    let orchestrator = SelectionOrchestrator::new(
        Arc::clone(&provider),
        SelectionOptions {
            fallback_technique_id: settings.safety.fallback_technique_id.clone(),
            sleep_duration_floor_secs: settings.safety.sleep_duration_floor_secs,
            temperature: settings.api.temperature,
            max_input_chars: settings.safety.max_input_chars,
        },
    );
    let agent = BreathingAgent::new(classifier, orchestrator);

    let server = InuaServer::new(
        ServerConfig {
            host: settings.server.host.clone(),
            port: settings.server.port,
            max_input_bytes: settings.safety.max_input_bytes,
        },
        agent,
        CatalogHandle::new(catalog),
    );

    // SIGHUP swaps in a freshly-loaded catalog; readers mid-request keep
    // their snapshot.
    #[cfg(unix)]
    {
        let catalog_handle = Arc::clone(server.catalog());
        let catalog_path = settings.catalog.path.clone();
        drop(tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};
            let Ok(mut hangup) = signal(SignalKind::hangup()) else {
                warn!("failed to install SIGHUP handler; hot reload disabled");
                return;
            };
            while hangup.recv().await.is_some() {
                let fresh = load_catalog(Path::new(&catalog_path));
                info!(count = fresh.len(), "catalog reloaded");
                catalog_handle.swap(fresh);
            }
        }));
    }

    let listener = tokio::net::TcpListener::bind(server.config().bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", server.config().bind_addr()))?;
    info!(
        addr = %listener.local_addr()?,
        model = %settings.api.model,
        "Inua server listening"
    );

    axum::serve(listener, server.router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn apply_cli_overrides(settings: &mut InuaSettings, cli: &Cli) {
    if let Some(host) = &cli.host {
        settings.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(catalog) = &cli.catalog {
        settings.catalog.path = catalog.display().to_string();
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
