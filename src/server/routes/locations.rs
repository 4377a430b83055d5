use axum::extract::State;
use axum::response::Response;

use super::json;
use crate::server::error::ApiError;
use crate::server::params::RequestParams;
use crate::server::state::AppState;

/// Resolve the body's `candidates`, or candidates found in `text`.
pub(crate) async fn locations(
    State(state): State<AppState>,
    params: RequestParams,
) -> Result<Response, ApiError> {
    params.expect_json()?;
    let ctx = params.context()?;
    let candidates: Option<Vec<String>> = params.body_field("candidates")?;
    let output = state
        .run(move |gateway| gateway.find_locations(&ctx, candidates))
        .await?;
    json(&output, params.flag("pretty"))
}
