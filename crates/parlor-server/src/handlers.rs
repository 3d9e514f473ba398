//! HTTP handlers for the Parlor server.
//!
//! The surface maps 1:1 onto the core operations: registration, participant
//! listing, message posting and listing, and heartbeats. The caller's
//! identity travels in the `User` request header; an absent header is
//! treated as an empty, unauthenticated reader.

use crate::config::Config;
use crate::metrics;
use crate::sweep;
use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parlor_core::{ChatError, MessageRouter, Registry, SystemClock};
use parlor_model::MessageKind;
use parlor_store::{MemoryStore, Store};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Shared server state.
pub struct AppState {
    /// Presence registry.
    pub registry: Registry,
    /// Message router.
    pub messages: MessageRouter,
}

impl AppState {
    /// Create new app state over a fresh in-memory store.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let clock = Arc::new(SystemClock);

        Self {
            registry: Registry::new(store.clone(), clock.clone(), config.stale_after()),
            messages: MessageRouter::new(store, clock),
        }
    }
}

/// Run the HTTP server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: Config) -> Result<()> {
    let state = Arc::new(AppState::new(&config));

    // Start metrics server if enabled
    if config.metrics.enabled {
        if let Err(e) = metrics::start_metrics_server(config.metrics.port) {
            error!("Failed to start metrics server: {}", e);
        }
    }

    // Background eviction sweep, decoupled from request handling
    sweep::spawn(state.registry.clone(), config.sweep_interval());

    // Build router
    let app = Router::new()
        .route("/participants", post(register).get(list_participants))
        .route("/messages", post(post_message).get(list_messages))
        .route("/status", post(heartbeat))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Bind and serve
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await?;

    info!("Parlor server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check handler.
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Deserialize)]
struct RegisterBody {
    name: String,
}

/// `POST /participants` - register a new participant.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterBody>,
) -> Response {
    let start = Instant::now();
    let response = match state.registry.register(&body.name).await {
        Ok(()) => {
            metrics::record_registration();
            StatusCode::CREATED.into_response()
        }
        Err(e) => error_response(e),
    };
    metrics::record_latency(start.elapsed().as_secs_f64());
    response
}

/// `GET /participants` - list registered participants.
async fn list_participants(State(state): State<Arc<AppState>>) -> Response {
    match state.registry.list().await {
        Ok(participants) => Json(participants).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
struct PostMessageBody {
    to: String,
    text: String,
    kind: MessageKind,
}

/// `POST /messages` - post a broadcast or direct message.
async fn post_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<PostMessageBody>,
) -> Response {
    let start = Instant::now();
    let from = user_header(&headers);

    let response = match state
        .messages
        .post(&from, &body.to, &body.text, body.kind)
        .await
    {
        Ok(()) => {
            metrics::record_message(body.kind.as_str());
            StatusCode::CREATED.into_response()
        }
        Err(e) => error_response(e),
    };
    metrics::record_latency(start.elapsed().as_secs_f64());
    response
}

#[derive(Debug, Deserialize)]
struct ListMessagesParams {
    limit: Option<String>,
}

/// `GET /messages` - list the messages visible to the caller.
async fn list_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ListMessagesParams>,
) -> Response {
    let reader = user_header(&headers);

    // Parsed by hand so a malformed limit is a validation failure (422),
    // not an extractor rejection.
    let limit = match params.limit.as_deref().map(str::parse::<i64>) {
        None => None,
        Some(Ok(n)) => Some(n),
        Some(Err(_)) => {
            return error_response(ChatError::Validation(vec![
                "limit must be a positive integer".to_string(),
            ]))
        }
    };

    match state.messages.list(&reader, limit).await {
        Ok(listing) => Json(listing).into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /status` - heartbeat for the calling participant.
async fn heartbeat(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let name = user_header(&headers);
    match state.registry.heartbeat(&name).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => error_response(e),
    }
}

/// Caller identity from the `User` header; empty when absent.
fn user_header(headers: &HeaderMap) -> String {
    headers
        .get("user")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Map a core error onto the HTTP surface.
///
/// Validation failures carry the aggregated violation list as a JSON array.
fn error_response(err: ChatError) -> Response {
    match err {
        ChatError::Validation(violations) => {
            metrics::record_error("validation");
            (StatusCode::UNPROCESSABLE_ENTITY, Json(violations)).into_response()
        }
        ChatError::Conflict(_) => {
            metrics::record_error("conflict");
            StatusCode::CONFLICT.into_response()
        }
        ChatError::NotFound(_) => {
            metrics::record_error("not_found");
            StatusCode::NOT_FOUND.into_response()
        }
        ChatError::UnknownSender(_) => {
            metrics::record_error("unknown_sender");
            StatusCode::UNPROCESSABLE_ENTITY.into_response()
        }
        ChatError::Store(e) => {
            metrics::record_error("store");
            error!(error = %e, "Store failure");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
