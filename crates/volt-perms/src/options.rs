//! Switches for the server-scope calculators.

/// Which rules the server and server-channel calculators apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Grant the server owner every permission.
    pub with_ownership: bool,
    /// Clamp timed-out members to the timeout allow-list.
    pub include_timeout: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            with_ownership: true,
            include_timeout: true,
        }
    }
}

impl ResolveOptions {
    /// Compute what a member's roles grant, ignoring ownership and timeouts.
    pub const fn roles_only() -> Self {
        Self {
            with_ownership: false,
            include_timeout: false,
        }
    }
}
