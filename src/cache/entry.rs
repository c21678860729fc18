//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute expiry.

// == Cache Entry ==
/// Represents a single cache entry with its value and expiry instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix seconds)
    pub expires_at: i64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring at `expires_at` (Unix seconds).
    pub fn new(value: V, expires_at: i64) -> Self {
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks expiry against an explicit instant.
    ///
    /// Boundary condition: an entry is expired once `now` reaches
    /// `expires_at`. Reads and sweeps share this predicate.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in seconds.
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
