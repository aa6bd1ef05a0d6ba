use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use lcscrape_core::error::ScrapeError;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `ScrapeError`.
pub struct ApiError(pub ScrapeError);

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            ScrapeError::ProfileNotFound => (StatusCode::NOT_FOUND, "not_found"),
            // Everything else is unexpected here: backend gaps and fetch
            // failures are consumed inside the orchestrator, never surfaced.
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.0.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
