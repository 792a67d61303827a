//! Permission overrides.
//!
//! An override is an `{allow, deny}` pair layered on top of inherited
//! permissions. Roles carry one, and server channels carry one for everyone
//! plus one per role.

use serde::{Deserialize, Serialize};

use crate::flags::Permissions;

/// A single `{allow, deny}` permission layer.
///
/// On the wire this is `{"a": allow, "d": deny}` inside entities and
/// `{"allow": allow, "deny": deny}` in request bodies; both decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionOverride {
    /// Permissions to grant.
    #[serde(rename = "a", alias = "allow", default)]
    pub allow: Permissions,

    /// Permissions to revoke. Wins over `allow` for the same bit.
    #[serde(rename = "d", alias = "deny", default)]
    pub deny: Permissions,
}

impl PermissionOverride {
    /// The override that changes nothing.
    pub const EMPTY: Self = Self {
        allow: Permissions::empty(),
        deny: Permissions::empty(),
    };

    /// Create an override from explicit allow and deny sets.
    pub const fn new(allow: Permissions, deny: Permissions) -> Self {
        Self { allow, deny }
    }

    /// An override that only grants.
    pub const fn allowing(allow: Permissions) -> Self {
        Self::new(allow, Permissions::empty())
    }

    /// An override that only revokes.
    pub const fn denying(deny: Permissions) -> Self {
        Self::new(Permissions::empty(), deny)
    }

    /// Whether applying this override is a no-op.
    pub const fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.deny.is_empty()
    }

    /// Every bit this override mentions, either way.
    pub const fn mentioned(&self) -> Permissions {
        self.allow.union(self.deny)
    }

    /// Layer this override on top of `base`.
    ///
    /// Allowed bits are added, then denied bits are cleared, so a bit in both
    /// sets ends up denied. Bits the override does not mention pass through
    /// unchanged, including bits with no named permission.
    ///
    /// ```
    /// use volt_core::{PermissionOverride, Permissions};
    ///
    /// let layer = PermissionOverride::new(
    ///     Permissions::REACT | Permissions::SEND_MESSAGES,
    ///     Permissions::SEND_MESSAGES,
    /// );
    /// let result = layer.apply(Permissions::VIEW_CHANNEL);
    /// assert_eq!(result, Permissions::VIEW_CHANNEL | Permissions::REACT);
    /// ```
    #[must_use]
    pub const fn apply(&self, base: Permissions) -> Permissions {
        base.union(self.allow).difference(self.deny)
    }
}

impl From<(Permissions, Permissions)> for PermissionOverride {
    fn from((allow, deny): (Permissions, Permissions)) -> Self {
        Self::new(allow, deny)
    }
}
