//! Domain-keyed commands. Without a domain they fan out over every domain.

use axum::extract::State;
use axum::response::Response;

use super::json;
use crate::server::error::ApiError;
use crate::server::params::RequestParams;
use crate::server::state::AppState;

pub(crate) async fn categorize(
    State(state): State<AppState>,
    params: RequestParams,
) -> Result<Response, ApiError> {
    let ctx = params.context()?;
    let output = state.run(move |gateway| gateway.categorize(&ctx)).await?;
    json(&output, params.flag("pretty"))
}

pub(crate) async fn frames(
    State(state): State<AppState>,
    params: RequestParams,
) -> Result<Response, ApiError> {
    let ctx = params.context()?;
    let output = state.run(move |gateway| gateway.extract_frames(&ctx)).await?;
    json(&output, params.flag("pretty"))
}

pub(crate) async fn label(
    State(state): State<AppState>,
    params: RequestParams,
) -> Result<Response, ApiError> {
    params.expect_json()?;
    let ctx = params.context()?;
    let output = state.run(move |gateway| gateway.label(&ctx)).await?;
    json(&output, params.flag("pretty"))
}
