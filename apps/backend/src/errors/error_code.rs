//! Error codes for the Wisdom Center API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the `code` field of
//! error responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Missing, malformed, forged or expired session token
    Unauthorized,
    /// Identity does not own the requested resource
    Forbidden,

    // Request Validation
    /// Malformed request body
    BadRequest,
    /// Empty or missing email in an identity claim
    InvalidEmail,
    /// Document content rejected by a store operation
    ValidationError,
    /// Request body over the size limit
    PayloadTooLarge,

    // Business Logic Conflicts
    /// Same book already borrowed by the same reader
    AlreadyBorrowed,
    /// Document `_id` already present in the collection
    DuplicateId,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Store operation failed
    StoreError,
    /// Store unreachable
    StoreUnavailable,
    /// Store timed out
    StoreTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",

            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",

            Self::AlreadyBorrowed => "ALREADY_BORROWED",
            Self::DuplicateId => "DUPLICATE_ID",
            Self::Conflict => "CONFLICT",

            Self::StoreError => "STORE_ERROR",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
