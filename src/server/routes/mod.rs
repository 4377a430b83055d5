//! HTTP handlers, one module per command family.

pub(super) mod compare;
pub(super) mod domain;
pub(super) mod locations;
pub(super) mod system;
pub(super) mod text;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::error::ApiError;
use crate::format;

/// Encode `value` as a JSON response.
pub(super) fn json<T: Serialize>(value: &T, pretty: bool) -> Result<Response, ApiError> {
    let body = format::to_json(value, pretty)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
