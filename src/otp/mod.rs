//! OTP Module
//!
//! Generates fixed-length numeric one-time passwords and validates them
//! against an expiring cache.

mod random;
mod service;

pub use random::{OsRandom, RandomSource};
pub use service::{
    IssuedOtp, OtpConfig, OtpService, DEFAULT_OTP_LENGTH, DEFAULT_OTP_TTL, MAX_OTP_LENGTH,
};
