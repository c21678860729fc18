//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of digits per OTP
    pub otp_length: usize,
    /// OTP lifetime in seconds
    pub otp_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `OTP_LENGTH` - Digits per OTP (default: 6)
    /// - `OTP_TTL` - OTP lifetime in seconds (default: 600)
    /// - `SWEEP_INTERVAL` - Expiry sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            otp_length: env_or("OTP_LENGTH", defaults.otp_length),
            otp_ttl: env_or("OTP_TTL", defaults.otp_ttl),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// OTP lifetime as a Duration.
    pub fn otp_ttl(&self) -> Duration {
        Duration::from_secs(self.otp_ttl)
    }

    /// Sweep interval as a Duration, never shorter than one second.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            otp_length: 6,
            otp_ttl: 600,
            sweep_interval: 60,
            server_port: 3000,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.otp_length, 6);
        assert_eq!(config.otp_ttl, 600);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("OTP_LENGTH");
        env::remove_var("OTP_TTL");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.otp_length, 6);
        assert_eq!(config.otp_ttl(), Duration::from_secs(600));
        assert_eq!(config.sweep_interval(), Duration::from_secs(60));
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("OTP_CACHE_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("OTP_CACHE_TEST_GARBAGE", 42u64), 42);
        env::remove_var("OTP_CACHE_TEST_GARBAGE");
    }

    #[test]
    fn test_sweep_interval_floor() {
        let config = Config {
            sweep_interval: 0,
            ..Config::default()
        };
        assert_eq!(config.sweep_interval(), Duration::from_secs(1));
    }
}
