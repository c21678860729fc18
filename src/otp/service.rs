//! OTP Service
//!
//! Issues numeric OTPs into a cache and consumes them on successful validation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::cache::{current_timestamp, shared, Cache};
use crate::error::{OtpError, Result};
use crate::otp::{OsRandom, RandomSource};

// == Public Constants ==
/// Digits per OTP when none (or less than one) is configured
pub const DEFAULT_OTP_LENGTH: usize = 6;

/// Longest OTP whose range still fits in a `u64`
pub const MAX_OTP_LENGTH: usize = 19;

/// Lifetime of a freshly generated OTP
pub const DEFAULT_OTP_TTL: Duration = Duration::from_secs(10 * 60);

// == OTP Config ==
/// Construction options for [`OtpService`]. Unset fields fall back to defaults.
#[derive(Clone, Default)]
pub struct OtpConfig {
    /// Backing cache; the process default cache when `None`
    pub cache: Option<Arc<dyn Cache<String>>>,
    /// Number of digits; values below 1 mean [`DEFAULT_OTP_LENGTH`]
    pub length: usize,
    /// OTP lifetime; [`DEFAULT_OTP_TTL`] when `None`
    pub ttl: Option<Duration>,
    /// Random source; [`OsRandom`] when `None`
    pub random: Option<Arc<dyn RandomSource>>,
}

impl OtpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(mut self, cache: Arc<dyn Cache<String>>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = Some(random);
        self
    }
}

// == Issued OTP ==
/// A freshly generated OTP together with its expiry instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedOtp {
    /// Zero-padded decimal digits
    pub otp: String,
    /// Expiration timestamp (Unix seconds)
    pub expires_at: i64,
}

// == OTP Service ==
/// Generates and validates single-use numeric OTPs.
#[derive(Clone)]
pub struct OtpService {
    cache: Arc<dyn Cache<String>>,
    length: usize,
    ttl: Duration,
    random: Arc<dyn RandomSource>,
}

impl fmt::Debug for OtpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpService")
            .field("length", &self.length)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl OtpService {
    // == Constructor ==
    /// Creates a service, filling unset options with defaults.
    ///
    /// Fails only when the configured length exceeds [`MAX_OTP_LENGTH`].
    pub fn new(config: OtpConfig) -> Result<Self> {
        let length = if config.length < 1 {
            DEFAULT_OTP_LENGTH
        } else {
            config.length
        };
        if length > MAX_OTP_LENGTH {
            return Err(OtpError::InvalidLength(length));
        }

        let cache: Arc<dyn Cache<String>> = match config.cache {
            Some(cache) => cache,
            None => shared::default_cache(),
        };
        let random: Arc<dyn RandomSource> = match config.random {
            Some(random) => random,
            None => Arc::new(OsRandom),
        };

        Ok(Self {
            cache,
            length,
            ttl: config.ttl.unwrap_or(DEFAULT_OTP_TTL),
            random,
        })
    }

    /// Number of digits in generated OTPs.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Lifetime of generated OTPs.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Generate ==
    /// Generates an OTP for `key`, replacing any pending one.
    pub fn generate_otp(&self, key: &str) -> Result<String> {
        self.issue(key).map(|issued| issued.otp)
    }

    /// Generates an OTP for `key` and reports when it expires.
    ///
    /// The value is drawn uniformly from `[10^(L-1), 10^L - 1]`, so a
    /// single-digit OTP is never `0`.
    pub fn issue(&self, key: &str) -> Result<IssuedOtp> {
        let (min, max) = self.range();
        let value = self.random.random_in_range(min, max)?;
        let otp = format!("{:0width$}", value, width = self.length);

        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let expires_at = current_timestamp().saturating_add(ttl_secs);
        self.cache
            .set(key, otp.clone(), expires_at)
            .map_err(OtpError::CacheWrite)?;

        debug!(key, expires_at, "Generated OTP");
        Ok(IssuedOtp { otp, expires_at })
    }

    // == Validate ==
    /// Checks `otp` against the pending OTP for `key` and consumes it on match.
    ///
    /// A mismatch leaves the pending OTP in place.
    pub fn validate_otp(&self, key: &str, otp: &str) -> Result<bool> {
        if otp.is_empty() || otp.len() != self.length {
            return Err(OtpError::InvalidFormat);
        }

        let cached = self
            .cache
            .get(key)
            .ok_or_else(|| OtpError::NotFound(key.to_string()))?;

        if !bool::from(cached.as_bytes().ct_eq(otp.as_bytes())) {
            warn!(key, "OTP mismatch");
            return Err(OtpError::Mismatch(key.to_string()));
        }

        self.cache.delete(key);
        debug!(key, "OTP validated and consumed");
        Ok(true)
    }

    fn range(&self) -> (u64, u64) {
        let min = 10u64.pow(self.length as u32 - 1);
        (min, min * 10 - 1)
    }
}
