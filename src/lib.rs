//! OTP Cache - one-time passwords over an in-memory expiring cache
//!
//! Provides numeric OTP issuance and single-use validation backed by a
//! concurrent key/value store with per-entry expiry and periodic sweeping.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod otp;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, ExpiringCache};
pub use config::Config;
pub use error::{CacheError, OtpError};
pub use otp::{OtpConfig, OtpService};
pub use tasks::{spawn_sweep_task, SweepHandle};
