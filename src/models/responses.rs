//! Response DTOs for the OTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStats;
use crate::otp::IssuedOtp;

/// Response body for POST /otp/generate
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    /// The key the OTP was issued for
    pub key: String,
    /// The generated OTP
    pub otp: String,
    /// Expiry in ISO 8601 format
    pub expires_at: String,
}

impl GenerateResponse {
    /// Creates a new GenerateResponse from an issued OTP
    pub fn new(key: impl Into<String>, issued: IssuedOtp) -> Self {
        let expires_at = DateTime::<Utc>::from_timestamp(issued.expires_at, 0)
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        Self {
            key: key.into(),
            otp: issued.otp,
            expires_at,
        }
    }
}

/// Response body for POST /otp/validate
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    /// Success message
    pub message: String,
    /// The key whose OTP was validated
    pub key: String,
    /// Validation outcome
    pub valid: bool,
}

impl ValidateResponse {
    /// Creates a ValidateResponse for a consumed OTP
    pub fn valid(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("OTP for '{}' validated successfully", key),
            key,
            valid: true,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads that found a live entry
    pub hits: u64,
    /// Reads that found nothing
    pub misses: u64,
    /// Expired entries removed by sweeps
    pub reclaimed: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            reclaimed: stats.reclaimed,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_response_serialize() {
        let resp = GenerateResponse::new(
            "user-1",
            IssuedOtp {
                otp: "004213".to_string(),
                expires_at: 0,
            },
        );
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("user-1"));
        assert!(json.contains("004213"));
        assert!(json.contains("1970-01-01T00:00:00"));
    }

    #[test]
    fn test_validate_response_serialize() {
        let resp = ValidateResponse::valid("user-1");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"valid\":true"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let resp = StatsResponse::from(CacheStats {
            hits: 80,
            misses: 20,
            reclaimed: 5,
            total_entries: 100,
        });
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.reclaimed, 5);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
