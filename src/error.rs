//! Unified API error handling
//!
//! Every failure a screen can surface maps to a stable code and status here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::attachment::AttachmentRejected;
use crate::services::backend::BackendError;
use crate::services::profile_editor::EditorError;
use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    AttachmentRejected(#[from] AttachmentRejected),

    #[error("Commit failed: {0}")]
    CommitFailed(#[source] BackendError),

    #[error("Backend unavailable: {0}")]
    Unavailable(#[source] BackendError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ValidationErrors>,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) | Self::AttachmentRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::CommitFailed(_) | Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::AttachmentRejected(_) => "ATTACHMENT_REJECTED",
            Self::CommitFailed(_) => "COMMIT_FAILED",
            Self::Unavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Unauthorized(msg) | Self::BadRequest(msg) | Self::Conflict(msg) => msg.clone(),
            Self::Validation(_) => "Please correct the highlighted fields".to_string(),
            Self::AttachmentRejected(e) => e.to_string(),
            Self::CommitFailed(_) => {
                crate::services::profile_editor::FAILURE_MESSAGE.to_string()
            }
            Self::Unavailable(_) => "Something went wrong. Please try again.".to_string(),
            // Don't leak internal error details
            Self::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

impl From<EditorError> for ApiError {
    fn from(e: EditorError) -> Self {
        match e {
            EditorError::NotAllowed { .. } => Self::Conflict(e.to_string()),
            EditorError::Invalid(errors) => Self::Validation(errors),
            EditorError::Rejected(rejected) => Self::AttachmentRejected(rejected),
            EditorError::Commit(source) => Self::CommitFailed(source),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, "Internal server error");
            }
            Self::CommitFailed(e) => {
                tracing::error!(error = %e, "Profile commit failed");
            }
            Self::Unavailable(e) => {
                tracing::warn!(error = %e, "Backend unavailable");
            }
            _ => {
                tracing::warn!(error = %self, "API error");
            }
        }

        let status = self.status_code();
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
            fields: match self {
                Self::Validation(errors) => Some(errors),
                _ => None,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::profile_editor::EditorMode;

    #[test]
    fn editor_errors_map_to_statuses() {
        let conflict: ApiError = EditorError::NotAllowed {
            mode: EditorMode::Saving,
            action: "submit",
        }
        .into();
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(conflict.public_message(), "cannot submit while saving");

        let commit: ApiError = EditorError::Commit(BackendError::TimedOut(
            std::time::Duration::from_secs(1),
        ))
        .into();
        assert_eq!(commit.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(commit.error_code(), "COMMIT_FAILED");

        let unavailable = ApiError::Unavailable(BackendError::Unavailable("down".into()));
        assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(unavailable.error_code(), "SERVICE_UNAVAILABLE");

        let rejected: ApiError = AttachmentRejected::Empty.into();
        assert_eq!(rejected.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
