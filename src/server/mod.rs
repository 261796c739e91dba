//! HTTP API server
//!
//! Goal CRUD over the file store plus a chat endpoint relaying to the
//! generative model.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::core::store::GoalStore;
use crate::model::GenerativeModel;

pub use error::ApiError;

/// Shared handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<GoalStore>,
    pub model: Arc<dyn GenerativeModel>,
}

impl AppState {
    pub fn new(store: GoalStore, model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            store: Arc::new(store),
            model,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .merge(api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/goals",
            get(handlers::list_goals).post(handlers::create_goal),
        )
        .route(
            "/api/goals/{index}",
            delete(handlers::delete_goal).put(handlers::replace_goal),
        )
        .route("/api/chat", post(handlers::chat))
}

/// Bind and serve until Ctrl-C
pub async fn run_server(host: &str, port: u16, state: AppState) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
