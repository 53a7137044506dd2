//! Conversa - conversational assistant with web search fallback
//!
//! Serves a chat page and an ask endpoint backed by a small decision
//! graph: a Gemini responder that either answers or flags a search, and a
//! Tavily search stage that summarizes what it finds.

mod api;
mod config;
mod graph;
mod llm;
mod search;

use api::{create_router, AppState};
use axum::http::HeaderValue;
use config::{AppConfig, CorsOrigins};
use graph::Conversation;
use llm::{GeminiService, LlmService, LoggingService};
use search::{LoggingSearchService, SearchService, TavilyService};
use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(None)?;
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    init_tracing(Some(&config.log_dir))?;

    let conversation = build_conversation(&config)?;
    let state = AppState::new(conversation);

    let app = create_router(state)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        model = %config.gemini_model,
        safety = ?config.safety.threshold,
        "Conversa server listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// JSON to stdout, plus plain text to `<log_dir>/app.log` when given
fn init_tracing(log_dir: Option<&Path>) -> std::io::Result<()> {
    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("app.log"))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conversa=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(file_layer)
        .init();

    Ok(())
}

fn build_conversation(config: &AppConfig) -> Result<Conversation, Box<dyn std::error::Error>> {
    let gemini = GeminiService::new(
        config.gemini_api_key.clone(),
        &config.gemini_model,
        config.gemini_base_url.as_deref(),
        config.safety,
    )?;
    let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(gemini)));

    let tavily = TavilyService::new(
        config.tavily_api_key.clone(),
        config.tavily_base_url.as_deref(),
    )?;
    let search: Arc<dyn SearchService> = Arc::new(LoggingSearchService::new(Arc::new(tavily)));

    Ok(Conversation::new(llm, search))
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::from(Any),
        CorsOrigins::List(list) => AllowOrigin::list(list.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| tracing::warn!(origin = %origin, "Ignoring invalid CORS origin"))
                .ok()
        })),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
