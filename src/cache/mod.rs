//! Cache Module
//!
//! Provides a concurrency-safe in-memory cache with per-entry expiry.

mod entry;
pub mod shared;
mod stats;
mod store;


use crate::error::CacheError;

// Re-export public types
pub use entry::{current_timestamp, CacheEntry};
pub use stats::CacheStats;
pub use store::ExpiringCache;

// == Cache Contract ==
/// Operations any backing store must provide to hold OTPs.
///
/// Expiry instants are Unix timestamps in seconds. An entry whose expiry is
/// at or before the current time is absent for `get` and `exists`.
pub trait Cache<V>: Send + Sync {
    /// Returns the value if the key exists and has not expired.
    fn get(&self, key: &str) -> Option<V>;

    /// Stores `value` under `key` until `expires_at`, replacing any previous entry.
    fn set(&self, key: &str, value: V, expires_at: i64) -> Result<(), CacheError>;

    /// Removes the key. Absent keys are ignored.
    fn delete(&self, key: &str);

    /// Checks whether the key exists and has not expired.
    fn exists(&self, key: &str) -> bool;

    /// Removes every entry.
    fn clear(&self);

    /// Removes all expired entries, returning how many were dropped.
    fn remove_expired_entries(&self) -> usize;
}
