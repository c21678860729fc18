//! Request DTOs for the OTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for POST /otp/generate
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// Identifier the OTP is issued for
    pub key: String,
}

impl GenerateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.trim().is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}

/// Request body for POST /otp/validate
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateRequest {
    /// Identifier the OTP was issued for
    pub key: String,
    /// Submitted OTP digits
    pub otp: String,
}
