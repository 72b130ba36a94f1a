use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::PagerError;
use tracing::error;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(error = %self.message, "request failed");
        }
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

impl From<PagerError> for ApiError {
    fn from(e: PagerError) -> Self {
        match e {
            PagerError::InvalidArgument(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            // a broken pager link is a host configuration bug, not client input
            PagerError::Configuration(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}
