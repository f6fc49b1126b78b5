//! Type-safe error codes for API responses.
//!
//! Each error code carries:
//! - String representation for client consumption (e.g., "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body or query failed field validation
    ValidationError,

    /// Query string could not be deserialized (missing or malformed parameter)
    InvalidQuery,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request is well-formed but violates a business rule
    BadRequest,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier that clients can match on.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Integer code for structured logs and metrics.
    ///
    /// - 1000-1999: client errors
    /// - 5000-5999: server errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidQuery => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::BadRequest => 1010,
            Self::InternalError => 5001,
        }
    }

    /// Default user-facing message. Handlers usually supply a more specific one.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidQuery => "Invalid query parameters",
            Self::JsonExtraction => "Failed to parse JSON request body",
            Self::NotFound => "Resource not found",
            Self::BadRequest => "Bad request",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorCode; 6] = [
        ErrorCode::ValidationError,
        ErrorCode::InvalidQuery,
        ErrorCode::JsonExtraction,
        ErrorCode::NotFound,
        ErrorCode::BadRequest,
        ErrorCode::InternalError,
    ];

    // Fails to compile when a variant is added without extending `ALL`.
    fn listed(code: ErrorCode) -> bool {
        match code {
            ErrorCode::ValidationError
            | ErrorCode::InvalidQuery
            | ErrorCode::JsonExtraction
            | ErrorCode::NotFound
            | ErrorCode::BadRequest
            | ErrorCode::InternalError => ALL.contains(&code),
        }
    }

    #[test]
    fn test_serde_matches_as_str() {
        for code in ALL {
            assert!(listed(code));
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_catalog_only_holds_emitted_codes() {
        let mut numbers: Vec<i32> = ALL.iter().map(ErrorCode::code).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, vec![1001, 1002, 1003, 1004, 1010, 5001]);
    }

    #[test]
    fn test_client_and_server_ranges() {
        for code in ALL {
            let expected = if code == ErrorCode::InternalError {
                5000..6000
            } else {
                1000..2000
            };
            assert!(expected.contains(&code.code()), "{code}");
        }
    }
}
