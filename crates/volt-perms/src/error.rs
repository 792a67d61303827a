//! Error types for the permissions module.

use thiserror::Error;

use volt_core::{RoleId, ServerId};

/// Errors that can occur during permission resolution.
///
/// The calculators themselves are total; errors only arise from the strict
/// lookups a caller opts into.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PermsError {
    /// A member references a role the server does not have.
    #[error("role {role_id} not found in server {server_id}")]
    UnknownRole { server_id: ServerId, role_id: RoleId },
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
