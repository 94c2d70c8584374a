//! Mapping of engine errors onto HTTP responses

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use roster_core::{ConflictKind, Error, Resource};
use serde::Serialize;

/// Body of every error response: `{"error": {"code", "message"}}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// Wrapper that lets handlers return core errors directly
#[derive(Debug)]
pub struct ApiError(pub Error);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Status code and stable machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::Conflict { kind, .. } => match kind {
                ConflictKind::AlreadyExists(Resource::Team) => {
                    (StatusCode::BAD_REQUEST, "TEAM_EXISTS")
                }
                ConflictKind::AlreadyExists(Resource::User) => {
                    (StatusCode::BAD_REQUEST, "USER_EXISTS")
                }
                ConflictKind::AlreadyExists(Resource::PullRequest) => {
                    (StatusCode::CONFLICT, "PR_EXISTS")
                }
                ConflictKind::AlreadyMerged => (StatusCode::CONFLICT, "PR_MERGED"),
                ConflictKind::NotAssigned => (StatusCode::CONFLICT, "NOT_ASSIGNED"),
                ConflictKind::NoCandidate => (StatusCode::CONFLICT, "NO_CANDIDATE"),
            },
            Error::Database(_) | Error::Config(_) | Error::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Internal details stay in the log
        let message = if status.is_server_error() {
            tracing::error!(
                error = %self.0,
                retryable = self.0.is_retryable(),
                "Request failed"
            );
            "internal server error".to_string()
        } else {
            tracing::warn!(code, error = %self.0, "Request rejected");
            self.0.to_string()
        };

        (
            status,
            Json(ErrorBody {
                error: ErrorDetail { code, message },
            }),
        )
            .into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(Error::InvalidInput(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(Error::InvalidInput(rejection.body_text()))
    }
}
