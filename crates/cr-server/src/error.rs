//! Failures surfaced by the HTTP API, rendered as `{"error":{"code","message"}}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cr_session::SessionError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("no model override for session {0}")]
    SessionNotFound(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Session(SessionError::InvalidSessionId(_)) => StatusCode::BAD_REQUEST,
            ApiError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidBody(rejection) => rejection.status(),
        }
    }

    /// Stable machine-readable code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::SessionNotFound(_) => "not_found",
            ApiError::Session(SessionError::InvalidSessionId(_)) => "bad_request",
            ApiError::Session(_) => "internal_error",
            ApiError::InvalidBody(_) => "invalid_request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}
