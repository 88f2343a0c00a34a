use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use groundrag_hybrid::AnswerEngine;
use groundrag_session::SessionRepository;

use crate::routes;

/// Shared state for the gateway.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnswerEngine>,
    pub sessions: Arc<dyn SessionRepository>,
    pub welcome_message: Arc<str>,
}

impl AppState {
    pub fn new(engine: Arc<AnswerEngine>, sessions: Arc<dyn SessionRepository>, welcome_message: &str) -> Self {
        Self { engine, sessions, welcome_message: Arc::from(welcome_message) }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/sessions", get(routes::list_sessions).post(routes::create_session))
        .route("/sessions/{id}", get(routes::get_session).delete(routes::delete_session))
        .route("/sessions/{id}/ask", post(routes::ask))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `host:port` and serve until the process is stopped.
pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "gateway listening on http://{} ({} chunks, generator: {})",
        addr,
        state.engine.store().len(),
        state.engine.generator_name()
    );
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
