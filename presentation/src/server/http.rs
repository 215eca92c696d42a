//! HTTP API for the council

use astris_application::{DeliberationOrchestrator, RunCouncilError};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

/// Body returned when the synthesis chain is exhausted
pub const UNAVAILABLE_MESSAGE: &str =
    "The council could not reach a conclusion. Please try again later.";

/// Body returned for internal faults; the detail stays in the logs
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Shared application state
struct AppState {
    orchestrator: Arc<DeliberationOrchestrator>,
}

/// Request for a council debate
#[derive(Debug, Deserialize)]
struct DebateRequest {
    user_query: String,
}

/// Response carrying the council's answer
#[derive(Debug, Serialize)]
struct DebateResponse {
    response: String,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Build the API router around a ready orchestrator
pub fn router(orchestrator: Arc<DeliberationOrchestrator>) -> Router {
    let state = Arc::new(AppState { orchestrator });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/council/debate", post(handle_debate))
        .route("/chat", post(handle_chat))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Run the HTTP server until Ctrl-C
pub async fn run_http_server(
    host: &str,
    port: u16,
    orchestrator: Arc<DeliberationOrchestrator>,
) -> std::io::Result<()> {
    let worst_case = orchestrator.worst_case();
    let app = router(orchestrator);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);
    info!("Worst-case deliberation time: {:?}", worst_case);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, draining in-flight requests");
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Astris is online." }))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn handle_chat() -> Json<DebateResponse> {
    Json(DebateResponse {
        response: "Councillor is ready.".to_string(),
    })
}

async fn handle_debate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DebateRequest>,
) -> Response {
    match state.orchestrator.deliberate(&req.user_query).await {
        Ok(deliberation) => {
            info!(
                "Debate answered by {} in {} ms",
                deliberation.provider, deliberation.elapsed_ms
            );
            (
                StatusCode::OK,
                Json(DebateResponse {
                    response: deliberation.response,
                }),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

fn error_response(e: RunCouncilError) -> Response {
    let (status, message) = match &e {
        RunCouncilError::InvalidInput(inner) => (StatusCode::BAD_REQUEST, inner.to_string()),
        RunCouncilError::ServiceUnavailable(_) => {
            warn!("Debate failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                UNAVAILABLE_MESSAGE.to_string(),
            )
        }
        RunCouncilError::Internal(_) => {
            error!("Debate failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
        }
    };

    (status, Json(ErrorResponse { error: message })).into_response()
}
