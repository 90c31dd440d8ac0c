//! HTTP chat API for the supervisor + legal expert agent (axum).
//!
//! `GET /` is a health check; `POST /chat` takes `{"message": "...",
//! "thread_id": "..."}` (thread_id optional, generated when absent) and
//! returns `{"response": "...", "thread_id": "..."}`.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`].

mod app;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use counsel::{AgentState, CompiledStateGraph};

use app::{router, AppState};

pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8000";

/// Runs the server on an existing listener with a prebuilt graph. Used by
/// tests (bind to 127.0.0.1:0 and pass a mock graph).
pub async fn run_serve_on_listener(
    listener: TcpListener,
    graph: CompiledStateGraph<AgentState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    info!("counsel API listening on http://{}", addr);

    let state = AppState {
        graph: Arc::new(graph),
    };
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Runs the server. Listens on `addr` (default 127.0.0.1:8000).
pub async fn run_serve(
    addr: Option<&str>,
    graph: CompiledStateGraph<AgentState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = addr.unwrap_or(DEFAULT_HTTP_ADDR);
    let listener = TcpListener::bind(addr).await?;
    run_serve_on_listener(listener, graph).await
}
