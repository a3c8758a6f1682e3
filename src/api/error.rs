use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::service::ServiceError;

/// Body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::NotFound(_) | Self::FeedbackItemNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Domain errors are reported verbatim. Store failures are logged in full
/// server-side and the client only sees a generic message.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Store(err) => {
                tracing::error!("Internal error: {}", err);
                "An unexpected error occurred".to_string()
            }
            other => {
                tracing::warn!("Request failed: {}", other);
                other.to_string()
            }
        };

        let body = ErrorResponse {
            status: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
