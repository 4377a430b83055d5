use axum::extract::State;
use axum::response::Response;

use super::json;
use crate::server::error::ApiError;
use crate::server::params::RequestParams;
use crate::server::state::AppState;
use crate::types::Candidate;

/// Rank `comparing` candidates by similarity to `text`.
pub(crate) async fn compare(
    State(state): State<AppState>,
    params: RequestParams,
) -> Result<Response, ApiError> {
    params.expect_json()?;
    params.require(&["text", "comparing"])?;
    let ctx = params.context()?;
    let candidates: Vec<Candidate> = params.body_field("comparing")?.unwrap_or_default();
    let output = state
        .run(move |gateway| gateway.compare(&ctx, &candidates))
        .await?;
    json(&output, params.flag("pretty"))
}
