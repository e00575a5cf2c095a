use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::{AccountError, ChatError, DocumentError};
use crate::domain::repositories::RepositoryError;
use crate::presentation::http::dto::ApiResponse;

/// Application-level error type. Every failing handler ends here and answers
/// with the standard error envelope.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    TokenMissing,
    TokenInvalid,
    InvalidCredentials,
    PlanLimit(String),
    NotFound(String),
    Conflict(String),
    EmailTaken,
    /// The answer engine failed; the cause is passed on to the client.
    Engine(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, &'static str, String, Option<String>) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_MISSING",
                "Authentication required".into(),
                None,
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_INVALID",
                "Invalid or expired token".into(),
                None,
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid email or password".into(),
                None,
            ),
            AppError::PlanLimit(msg) => (StatusCode::FORBIDDEN, "PLAN_LIMIT_REACHED", msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
            AppError::EmailTaken => (
                StatusCode::CONFLICT,
                "EMAIL_TAKEN",
                "An account with this email already exists".into(),
                None,
            ),
            AppError::Engine(cause) => {
                tracing::error!("Answer engine error: {}", cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ENGINE_ERROR",
                    "Failed to generate an answer".into(),
                    Some(cause),
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".into(),
                    None,
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, cause) = self.status_and_body();
        (
            status,
            Json(ApiResponse::<()>::error(code.to_string(), message, cause)),
        )
            .into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(msg) => AppError::Validation(msg),
            AccountError::EmailTaken => AppError::EmailTaken,
            AccountError::InvalidCredentials => AppError::InvalidCredentials,
            AccountError::UserNotFound => AppError::NotFound("User not found".into()),
            e @ AccountError::ClassExists(_) => AppError::Conflict(e.to_string()),
            e @ AccountError::ClassNotFound(_) => AppError::NotFound(e.to_string()),
            AccountError::Hashing(msg) => AppError::Internal(msg),
            AccountError::Repository(e) => e.into(),
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Validation(msg) => AppError::Validation(msg),
            DocumentError::NotFound(msg) => AppError::NotFound(msg),
            e @ DocumentError::PlanLimit { .. } => AppError::PlanLimit(format!(
                "{}. Upgrade to premium to upload more.",
                e
            )),
            DocumentError::Duplicate(msg) => AppError::Conflict(msg),
            DocumentError::Repository(e) => e.into(),
            DocumentError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Validation(msg) => AppError::Validation(msg),
            ChatError::NotFound(msg) => AppError::NotFound(msg),
            ChatError::Engine(e) => AppError::Engine(e.to_string()),
            ChatError::Repository(e) => e.into(),
        }
    }
}
