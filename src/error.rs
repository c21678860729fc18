//! Error types for the OTP cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by cache write operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key was empty or contained only whitespace
    #[error("key cannot be empty")]
    EmptyKey,
}

// == OTP Error Enum ==
/// Unified error type for OTP generation and validation.
#[derive(Error, Debug)]
pub enum OtpError {
    /// Submitted OTP was empty or had the wrong number of digits
    #[error("invalid OTP provided")]
    InvalidFormat,

    /// No live OTP is stored for the key
    #[error("OTP not found for key: {0}")]
    NotFound(String),

    /// Stored OTP differs from the submitted one
    #[error("OTP does not match for key: {0}")]
    Mismatch(String),

    /// The secure random source failed
    #[error("failed to generate random number: {0}")]
    RandomSource(#[from] rand::Error),

    /// Storing the OTP in the cache failed
    #[error("failed to store OTP in cache: {0}")]
    CacheWrite(#[source] CacheError),

    /// Configured length cannot be represented
    #[error("OTP length {0} is out of range (1..=19)")]
    InvalidLength(usize),

    /// Malformed request data at the HTTP boundary
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for OtpError {
    fn into_response(self) -> Response {
        let status = match &self {
            OtpError::InvalidFormat => StatusCode::BAD_REQUEST,
            OtpError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            OtpError::CacheWrite(CacheError::EmptyKey) => StatusCode::BAD_REQUEST,
            OtpError::NotFound(_) => StatusCode::NOT_FOUND,
            OtpError::Mismatch(_) => StatusCode::UNAUTHORIZED,
            OtpError::RandomSource(_) | OtpError::InvalidLength(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for OTP operations.
pub type Result<T> = std::result::Result<T, OtpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (OtpError::InvalidFormat, StatusCode::BAD_REQUEST),
            (
                OtpError::CacheWrite(CacheError::EmptyKey),
                StatusCode::BAD_REQUEST,
            ),
            (OtpError::NotFound("u1".into()), StatusCode::NOT_FOUND),
            (OtpError::Mismatch("u1".into()), StatusCode::UNAUTHORIZED),
            (OtpError::InvalidLength(25), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_cache_write_keeps_source() {
        use std::error::Error as _;

        let err = OtpError::CacheWrite(CacheError::EmptyKey);
        assert!(err.to_string().contains("failed to store OTP"));
        assert_eq!(err.source().unwrap().to_string(), "key cannot be empty");
    }
}
