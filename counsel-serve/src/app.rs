//! Axum app: state, router, and the chat handler.
//!
//! Routes: `GET /` health check; `POST /chat` runs the agent graph on the
//! request message and returns the final assistant reply with a thread id.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use counsel::runner::initial_state;
use counsel::{AgentState, CompiledStateGraph};

const NO_REPLY_FALLBACK: &str = "Извините, агент не вернул корректный ответ.";

/// Shared state: the compiled agent graph, cloned per request.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) graph: Arc<CompiledStateGraph<AgentState>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatRequest {
    message: String,
    thread_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatResponse {
    response: String,
    thread_id: String,
}

/// Builds the router: health at `/`, chat at `/chat`.
pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/chat", post(chat))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "Counsel Agent API"
    }))
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    let thread_id = request
        .thread_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    info!(thread_id = %thread_id, "chat request");

    match state.graph.invoke(initial_state(&request.message)).await {
        Ok(final_state) => {
            let response = final_state
                .last_assistant_reply()
                .unwrap_or_else(|| NO_REPLY_FALLBACK.to_string());
            Json(ChatResponse {
                response,
                thread_id,
            })
            .into_response()
        }
        Err(e) => {
            error!(thread_id = %thread_id, error = %e, "agent run failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "detail": format!("Internal Server Error: {}", e)
                })),
            )
                .into_response()
        }
    }
}
