use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// Fixed caller-facing message for every authentication failure.
pub const UNAUTHENTICATED_MESSAGE: &str = "unauthorized access";
/// Fixed caller-facing message for ownership mismatches.
pub const FORBIDDEN_MESSAGE: &str = "forbidden access";

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
    pub status: u16,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("Forbidden")]
    Forbidden,
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Payload too large: limit {limit} bytes")]
    PayloadTooLarge { limit: usize },
    #[error("Conflict: {detail}")]
    Conflict {
        code: ErrorCode,
        detail: String,
        status: StatusCode,
    },
    #[error("Store error: {detail}")]
    Store { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Unauthenticated => ErrorCode::Unauthorized,
            AppError::Forbidden => ErrorCode::Forbidden,
            AppError::BadRequest { code, .. } => *code,
            AppError::Validation { code, .. } => *code,
            AppError::PayloadTooLarge { .. } => ErrorCode::PayloadTooLarge,
            AppError::Conflict { code, .. } => *code,
            AppError::Store { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Caller-facing message. Store and internal failures never leak their detail.
    fn message(&self) -> String {
        match self {
            AppError::Unauthenticated => UNAUTHENTICATED_MESSAGE.to_string(),
            AppError::Forbidden => FORBIDDEN_MESSAGE.to_string(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::PayloadTooLarge { limit } => {
                format!("Request body exceeds {limit} bytes")
            }
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Store { .. } => "store operation failed".to_string(),
            AppError::Internal { .. } => "internal server error".to_string(),
            AppError::Config { .. } => "server misconfigured".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Conflict { status, .. } => *status,
            AppError::Store { code, .. } => match code {
                ErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthenticated() -> Self {
        Self::Unauthenticated
    }

    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn payload_too_large(limit: usize) -> Self {
        Self::PayloadTooLarge { limit }
    }

    /// Duplicate borrow. Reported as 400 like every other rejected write.
    pub fn already_borrowed() -> Self {
        Self::Conflict {
            code: ErrorCode::AlreadyBorrowed,
            detail: "book already borrowed".to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
            status: StatusCode::CONFLICT,
        }
    }

    pub fn store(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Store {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::invalid(ErrorCode::ValidationError, detail),
            DomainError::Conflict(ConflictKind::AlreadyBorrowed, _) => AppError::already_borrowed(),
            DomainError::Conflict(ConflictKind::DuplicateId, detail) => {
                AppError::conflict(ErrorCode::DuplicateId, detail)
            }
            DomainError::Conflict(ConflictKind::Other(_), detail) => {
                AppError::conflict(ErrorCode::Conflict, detail)
            }
            DomainError::Infra(InfraErrorKind::StoreUnavailable, detail) => {
                AppError::store(ErrorCode::StoreUnavailable, detail)
            }
            DomainError::Infra(InfraErrorKind::Timeout, detail) => {
                AppError::store(ErrorCode::StoreTimeout, detail)
            }
            DomainError::Infra(_, detail) => AppError::store(ErrorCode::StoreError, detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(trace_id = %trace_id, error = %self, "request failed");
        }

        let body = ErrorBody {
            message: self.message(),
            code: self.code().to_string(),
            status: status.as_u16(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .json(body)
    }
}
