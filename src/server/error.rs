//! Error mapping for HTTP responses.
//!
//! Every failure becomes exactly one response whose status comes from the
//! error's [`ErrorKind`]. Internal errors are logged in full and answered
//! with a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::{ErrorKind, MimirError};

/// A [`MimirError`] on its way to the client.
#[derive(Debug)]
pub struct ApiError(pub MimirError);

impl From<MimirError> for ApiError {
    fn from(err: MimirError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    kind: ErrorKind,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let status =
            StatusCode::from_u16(kind.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status.is_server_error() {
            error!(error = %self.0, kind = kind.as_str(), "request failed");
            "internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(ErrorBody {
                error: ErrorDetail { kind, message },
            }),
        )
            .into_response()
    }
}
