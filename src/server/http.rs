use crate::app::dto::*;
use crate::app::engine::AnalysisEngine;
use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[derive(Clone)]
pub struct HttpState {
    pub engine: AnalysisEngine,
}

#[derive(Debug, Clone, Serialize)]
struct ApiErrorBody {
    error: String,
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ApiErrorBody { error: msg.into() })).into_response()
}

/// Run engine work off the async runtime; engine errors map to `error_status`.
async fn blocking<T, F>(f: F, error_status: StatusCode) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    match spawn_blocking(f).await {
        Ok(Ok(res)) => Json(res).into_response(),
        Ok(Err(e)) => api_error(error_status, format!("{e:#}")),
        Err(e) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("task join error: {e}"),
        ),
    }
}

pub fn build_router(engine: AnalysisEngine) -> Router {
    let state = Arc::new(HttpState { engine });

    Router::new()
        .route("/health", get(health))
        .route("/endpoints", get(endpoints))
        .route("/analyze", post(analyze))
        .route("/fields", post(fields))
        .route("/graph", get(graph))
        .route("/rules", get(rules))
        .route("/reload", post(reload))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(engine: AnalysisEngine, addr: SocketAddr) -> Result<()> {
    let app = build_router(engine);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "http server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<Arc<HttpState>>) -> Response {
    match state.engine.health() {
        Ok(res) => Json(res).into_response(),
        Err(e) => api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

async fn reload(State(state): State<Arc<HttpState>>) -> Response {
    let engine = state.engine.clone();
    blocking(move || engine.reload(), StatusCode::INTERNAL_SERVER_ERROR).await
}

async fn endpoints(State(state): State<Arc<HttpState>>) -> Response {
    let engine = state.engine.clone();
    blocking(move || engine.endpoints(), StatusCode::INTERNAL_SERVER_ERROR).await
}

async fn analyze(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    let engine = state.engine.clone();
    blocking(move || engine.analyze(req), StatusCode::BAD_REQUEST).await
}

async fn fields(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<FieldsRequest>,
) -> Response {
    let engine = state.engine.clone();
    blocking(move || engine.fields(req), StatusCode::BAD_REQUEST).await
}

async fn graph(State(state): State<Arc<HttpState>>) -> Response {
    let engine = state.engine.clone();
    blocking(move || engine.graph(), StatusCode::INTERNAL_SERVER_ERROR).await
}

async fn rules(State(state): State<Arc<HttpState>>) -> Response {
    match state.engine.rules() {
        Ok(res) => Json(res).into_response(),
        Err(e) => api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
