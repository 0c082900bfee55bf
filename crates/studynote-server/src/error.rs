//! API error types with JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use studynote_ai::AiError;
use studynote_cache::ActionError;
use studynote_store::StoreError;

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Unauthorized (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Conflict (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    Internal(String),

    /// Note action error (validation, not-found, storage).
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Store error from direct store access (auth routes).
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// AI backend error.
    #[error(transparent)]
    Ai(#[from] AiError),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Action(e) => match e {
                ActionError::Validation(_) => "VALIDATION_ERROR",
                ActionError::NotFound(_) => "NOT_FOUND",
                ActionError::Store(_) => "STORAGE_ERROR",
            },
            Self::Store(e) => match e {
                StoreError::NoteNotFound(_) | StoreError::UserNotFound(_) => "NOT_FOUND",
                StoreError::DuplicateEmail(_) => "EMAIL_TAKEN",
                _ => "STORAGE_ERROR",
            },
            Self::Ai(e) => match e {
                AiError::EmptyInput(_) => "BAD_REQUEST",
                AiError::MissingApiKey => "INTERNAL_ERROR",
                AiError::Parse(_) => "AI_PARSE_ERROR",
                _ => "AI_UPSTREAM_ERROR",
            },
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Action(e) => match e {
                ActionError::Validation(_) => StatusCode::BAD_REQUEST,
                ActionError::NotFound(_) => StatusCode::NOT_FOUND,
                ActionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(e) => match e {
                StoreError::NoteNotFound(_) => StatusCode::NOT_FOUND,
                StoreError::UserNotFound(_) => StatusCode::NOT_FOUND,
                StoreError::DuplicateEmail(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Ai(e) => match e {
                AiError::EmptyInput(_) => StatusCode::BAD_REQUEST,
                AiError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
                AiError::Request(_)
                | AiError::Api { .. }
                | AiError::MalformedResponse(_)
                | AiError::Parse(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use studynote_core::{NoteId, ValidationError};

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::Action(ActionError::Validation(ValidationError::EmptyTitle));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn missing_note_maps_to_not_found() {
        let err = ApiError::Action(ActionError::NotFound(NoteId::new()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn duplicate_email_maps_to_conflict() {
        let err = ApiError::Store(StoreError::DuplicateEmail("a@b.c".to_string()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "EMAIL_TAKEN");
    }

    #[test]
    fn ai_parse_maps_to_bad_gateway() {
        let err = ApiError::Ai(AiError::Parse("no JSON object".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), "AI_PARSE_ERROR");
    }

    #[test]
    fn empty_ai_input_maps_to_bad_request() {
        let err = ApiError::Ai(AiError::EmptyInput("no topic provided"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
