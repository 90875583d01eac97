//! Error handling - every failure leaves as the standard response envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use eventdesk_core::DomainError;
use eventdesk_shared::ApiResponse;

/// Application-level error type that converts to envelope responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Rejection for requests that reach a protected path without an identity.
    pub fn authentication_required() -> Self {
        AppError::Unauthorized("Unauthorized: a valid bearer token is required".to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        let status = self.status_code();
        HttpResponse::build(status).json(ApiResponse::<()>::error(self.to_string(), status.as_u16()))
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::Validation(_)
            | DomainError::DuplicateUsername(_)
            | DomainError::ReferenceNotFound { .. } => AppError::BadRequest(err.to_string()),
            DomainError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            DomainError::Internal(msg) => {
                AppError::Internal(format!("An unexpected error occurred: {msg}"))
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
