//! API Handlers
//!
//! HTTP request handlers for each OTP service endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::cache::ExpiringCache;
use crate::config::Config;
use crate::error::{OtpError, Result};
use crate::models::{
    GenerateRequest, GenerateResponse, HealthResponse, StatsResponse, ValidateRequest,
    ValidateResponse,
};
use crate::otp::{OtpConfig, OtpService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache backing the OTP service, kept for statistics
    pub cache: Arc<ExpiringCache<String>>,
    /// OTP issuance and validation
    pub otp: OtpService,
}

impl AppState {
    /// Creates a new AppState whose OTP service stores into `cache`.
    pub fn new(cache: Arc<ExpiringCache<String>>, otp_config: OtpConfig) -> Result<Self> {
        let otp = OtpService::new(otp_config.with_cache(cache.clone()))?;
        Ok(Self { cache, otp })
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config, cache: Arc<ExpiringCache<String>>) -> Result<Self> {
        let otp_config = OtpConfig::new()
            .with_length(config.otp_length)
            .with_ttl(config.otp_ttl());
        Self::new(cache, otp_config)
    }
}

/// Handler for POST /otp/generate
///
/// Issues a new OTP for the key, replacing any pending one.
pub async fn generate_handler(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(OtpError::InvalidRequest(error_msg));
    }

    let issued = state.otp.issue(&req.key)?;
    Ok(Json(GenerateResponse::new(req.key, issued)))
}

/// Handler for POST /otp/validate
///
/// Validates the submitted OTP and consumes it on success.
pub async fn validate_handler(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>> {
    state.otp.validate_otp(&req.key, &req.otp)?;
    Ok(Json(ValidateResponse::valid(req.key)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::new(Arc::new(ExpiringCache::new()), OtpConfig::new().with_length(6)).unwrap()
    }

    #[tokio::test]
    async fn test_generate_then_validate() {
        let state = test_state();

        let req = GenerateRequest {
            key: "user-1".to_string(),
        };
        let response = generate_handler(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(response.otp.len(), 6);

        let req = ValidateRequest {
            key: "user-1".to_string(),
            otp: response.otp.clone(),
        };
        let result = validate_handler(State(state.clone()), Json(req)).await;
        assert!(result.unwrap().valid);

        let req = ValidateRequest {
            key: "user-1".to_string(),
            otp: response.otp.clone(),
        };
        let result = validate_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(OtpError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_generate_empty_key() {
        let state = test_state();

        let req = GenerateRequest {
            key: "".to_string(),
        };
        let result = generate_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(OtpError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_validate_bad_format() {
        let state = test_state();

        let req = ValidateRequest {
            key: "user-1".to_string(),
            otp: "12".to_string(),
        };
        let result = validate_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(OtpError::InvalidFormat)));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert_eq!(response.total_entries, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_state_from_config_rejects_long_otp() {
        let config = Config {
            otp_length: 25,
            ..Config::default()
        };
        let result = AppState::from_config(&config, Arc::new(ExpiringCache::new()));
        assert!(matches!(result, Err(OtpError::InvalidLength(25))));
    }
}
