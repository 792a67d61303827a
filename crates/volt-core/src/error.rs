//! Error types for Volt Core.

use thiserror::Error;

/// Errors that can occur while constructing core values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid {kind} id {value:?}: {reason}")]
    InvalidId {
        kind: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("unknown permission bits: {0:#x}")]
    UnknownPermissionBits(u64),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
