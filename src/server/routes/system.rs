use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::server::state::AppState;
use crate::version_string;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: String,
}

pub(crate) async fn health() -> impl IntoResponse {
    let body = HealthResponse {
        status: "up",
        version: version_string(),
    };
    (
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}

pub(crate) async fn capabilities(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.gateway.capabilities())
}
