//! Language-resolved text commands.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use super::json;
use crate::MimirError;
use crate::format::{self, ParseFormat};
use crate::server::error::ApiError;
use crate::server::params::RequestParams;
use crate::server::state::AppState;

pub(crate) async fn tokenize(
    State(state): State<AppState>,
    params: RequestParams,
) -> Result<Response, ApiError> {
    let ctx = params.context()?;
    let output = state.run(move |gateway| gateway.tokenize(&ctx)).await?;
    json(&output, params.flag("pretty"))
}

pub(crate) async fn detect_language(
    State(state): State<AppState>,
    params: RequestParams,
) -> Result<Response, ApiError> {
    let ctx = params.context()?;
    let output = state.run(move |gateway| gateway.detect_language(&ctx)).await?;
    json(&output, params.flag("pretty"))
}

pub(crate) async fn detect_language_per_token(
    State(state): State<AppState>,
    params: RequestParams,
) -> Result<Response, ApiError> {
    let ctx = params.context()?;
    let output = state
        .run(move |gateway| gateway.detect_language_per_token(&ctx))
        .await?;
    json(&output, params.flag("pretty"))
}

pub(crate) async fn parse(
    State(state): State<AppState>,
    params: RequestParams,
) -> Result<Response, ApiError> {
    let ctx = params.context()?;
    let format = match params.get("format") {
        Some(name) => ParseFormat::from_name(&name)
            .ok_or_else(|| MimirError::invalid("format", format!("unknown format '{name}'")))?,
        None => ParseFormat::Json,
    };

    let output = state.run(move |gateway| gateway.parse(&ctx)).await?;
    match format {
        ParseFormat::Json => json(&output, params.flag("pretty")),
        ParseFormat::Conll => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format::to_conll(&output.sentences),
        )
            .into_response()),
    }
}

pub(crate) async fn summarize(
    State(state): State<AppState>,
    params: RequestParams,
) -> Result<Response, ApiError> {
    params.expect_json()?;
    let ctx = params.context()?;
    let output = state.run(move |gateway| gateway.summarize(&ctx)).await?;
    json(&output, params.flag("pretty"))
}
