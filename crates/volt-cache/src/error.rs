//! Error types for the cache module.

use thiserror::Error;

use volt_core::ServerId;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    /// A writer panicked while holding the cache lock.
    #[error("cache lock poisoned")]
    Poisoned,

    /// A role was written for a server the cache does not hold.
    #[error("server not cached: {0}")]
    MissingServer(ServerId),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
