//! Servers and their roles.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::flags::Permissions;
use crate::overrides::PermissionOverride;
use crate::types::{RoleId, ServerId, UserId};

/// A role within a server.
///
/// Lower `rank` means a more senior role: rank 0 sits at the top of the
/// server's role list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// The role's id. On the wire this is the key of the server's role map.
    #[serde(skip)]
    pub id: RoleId,

    pub name: String,

    /// Server-wide permission layer granted by this role.
    #[serde(default)]
    pub permissions: PermissionOverride,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,

    /// Whether members with this role are listed separately.
    #[serde(default)]
    pub hoist: bool,

    #[serde(default)]
    pub mentionable: bool,

    #[serde(default)]
    pub rank: i64,
}

impl Role {
    /// Create a role with no permissions.
    pub fn new(id: impl Into<RoleId>, name: impl Into<String>, rank: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            permissions: PermissionOverride::EMPTY,
            colour: None,
            hoist: false,
            mentionable: false,
            rank,
        }
    }

    /// Set the role's permission layer.
    pub fn with_permissions(mut self, permissions: PermissionOverride) -> Self {
        self.permissions = permissions;
        self
    }

    /// Whether this role is ranked above `other`.
    pub fn outranks(&self, other: &Role) -> bool {
        self.rank < other.rank
    }
}

/// A server snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    #[serde(rename = "_id")]
    pub id: ServerId,

    #[serde(rename = "owner")]
    pub owner_id: UserId,

    pub name: String,

    #[serde(default, deserialize_with = "deserialize_roles")]
    pub roles: HashMap<RoleId, Role>,

    /// Permissions every member starts from.
    pub default_permissions: Permissions,
}

impl Server {
    /// Create a server with no roles and the platform's default permissions.
    pub fn new(id: impl Into<ServerId>, owner_id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            name: name.into(),
            roles: HashMap::new(),
            default_permissions: Permissions::DEFAULT_SERVER,
        }
    }

    /// Set the default permissions.
    pub fn with_default_permissions(mut self, permissions: Permissions) -> Self {
        self.default_permissions = permissions;
        self
    }

    /// Add (or replace) a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role.id.clone(), role);
        self
    }

    /// Whether `user_id` owns this server.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Look up a role by id.
    pub fn role(&self, role_id: &RoleId) -> Option<&Role> {
        self.roles.get(role_id)
    }
}

/// Decode the role map, filling each role's id from its key.
fn deserialize_roles<'de, D>(deserializer: D) -> Result<HashMap<RoleId, Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut roles = HashMap::<RoleId, Role>::deserialize(deserializer)?;
    for (id, role) in roles.iter_mut() {
        role.id = id.clone();
    }
    Ok(roles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_server_fills_role_ids() {
        let json = r#"{
            "_id": "01SERVER",
            "owner": "01OWNER",
            "name": "Lounge",
            "default_permissions": 4194304,
            "roles": {
                "01MOD": { "name": "Moderator", "permissions": { "a": 8388608, "d": 0 }, "rank": 1 },
                "01MUTED": { "name": "Muted", "permissions": { "a": 0, "d": 4194304 }, "rank": 5, "colour": "gray" }
            }
        }"#;

        let server: Server = serde_json::from_str(json).unwrap();

        assert_eq!(server.owner_id, UserId::new("01OWNER"));
        assert_eq!(server.default_permissions, Permissions::SEND_MESSAGES);
        let muted = server.role(&RoleId::new("01MUTED")).unwrap();
        assert_eq!(muted.id, RoleId::new("01MUTED"));
        assert_eq!(muted.permissions.deny, Permissions::SEND_MESSAGES);
        assert_eq!(muted.colour.as_deref(), Some("gray"));
        assert_eq!(server.role(&RoleId::new("01MOD")).unwrap().rank, 1);
    }

    #[test]
    fn test_decode_server_without_roles() {
        let json = r#"{"_id": "s", "owner": "o", "name": "n", "default_permissions": 0}"#;
        let server: Server = serde_json::from_str(json).unwrap();
        assert!(server.roles.is_empty());
    }

    #[test]
    fn test_outranks() {
        let admin = Role::new("a", "Admin", 0);
        let member = Role::new("m", "Member", 10);
        assert!(admin.outranks(&member));
        assert!(!member.outranks(&admin));
    }
}
