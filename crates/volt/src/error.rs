//! Error types for the calculator.

use thiserror::Error;
use volt_cache::CacheError;
use volt_core::Permissions;
use volt_perms::PermsError;

/// Errors that can occur while calculating permissions through the cache.
#[derive(Debug, Error)]
pub enum VoltError {
    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Strict role lookup failed.
    #[error("permission error: {0}")]
    Permission(#[from] PermsError),

    /// An entity the calculation needs is not cached.
    #[error("no {kind} cached with id {id}")]
    NoData { kind: &'static str, id: String },

    /// Entities passed together do not belong together.
    #[error("mismatched entities: {0}")]
    Mismatch(String),

    /// A pre-flight check found permissions lacking.
    #[error("missing permissions {missing:?} (required {required:?})")]
    MissingPermissions {
        required: Permissions,
        missing: Permissions,
    },
}

impl VoltError {
    pub(crate) fn no_data(kind: &'static str, id: impl ToString) -> Self {
        VoltError::NoData {
            kind,
            id: id.to_string(),
        }
    }
}

/// Result type for calculator operations.
pub type Result<T> = std::result::Result<T, VoltError>;
