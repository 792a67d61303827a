//! Named scenarios with known results.
//!
//! Each vector is a small, hand-checked situation. Any way of computing
//! permissions (the pure calculators, or the calculator over a cache) must
//! agree with every expected value here.

use chrono::Duration;

use volt_core::{
    DirectMessageChannel, Member, PermissionOverride, Permissions, RelationshipStatus, Role,
    Server, ServerChannel, UserId,
};
use volt_perms::{
    calculate_dm_channel_permissions, calculate_server_channel_permissions,
    calculate_server_permissions,
};

use crate::fixtures::fixed_now;

/// What a vector asks for.
#[derive(Debug, Clone)]
pub enum Query {
    /// The member's server-wide permissions.
    Server,
    /// The member's permissions in this channel.
    Channel(ServerChannel),
    /// The member's permissions in a DM with the given relationship to the other side.
    DirectMessage(RelationshipStatus),
}

/// A scenario test vector.
#[derive(Debug, Clone)]
pub struct ScenarioVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub server: Server,
    pub member: Member,
    pub query: Query,
    /// Expected result.
    pub expected: Permissions,
}

impl ScenarioVector {
    /// Resolve the query with the pure calculators at [`fixed_now`].
    pub fn resolve(&self) -> Permissions {
        match &self.query {
            Query::Server => calculate_server_permissions(&self.server, &self.member, fixed_now()),
            Query::Channel(channel) => {
                calculate_server_channel_permissions(&self.server, channel, &self.member, fixed_now())
            }
            Query::DirectMessage(relationship) => {
                calculate_dm_channel_permissions(&self.dm_channel(), *relationship)
            }
        }
    }

    /// The DM between the member and [`counterpart`](Self::counterpart).
    pub fn dm_channel(&self) -> DirectMessageChannel {
        DirectMessageChannel {
            id: "DM".into(),
            active: true,
            recipient_ids: vec![self.member.user_id().clone(), Self::counterpart()],
        }
    }

    /// The other side of a DM vector.
    pub fn counterpart() -> UserId {
        UserId::new("THEM")
    }
}

fn server(default: Permissions) -> Server {
    Server::new("S", "OWNER", "vectors").with_default_permissions(default)
}

fn muted() -> Role {
    Role::new("MUTED", "muted", 10).with_permissions(PermissionOverride::denying(Permissions::SEND_MESSAGES))
}

/// Get all scenario vectors.
pub fn all_vectors() -> Vec<ScenarioVector> {
    vec![
        ScenarioVector {
            name: "member without roles gets the server default",
            server: server(Permissions::DEFAULT_SERVER),
            member: Member::new("S", "U"),
            query: Query::Server,
            expected: Permissions::DEFAULT_SERVER,
        },
        ScenarioVector {
            name: "role deny removes a default permission",
            server: server(Permissions::SEND_MESSAGES).with_role(muted()),
            member: Member::new("S", "U").with_roles(["MUTED"]),
            query: Query::Server,
            expected: Permissions::empty(),
        },
        ScenarioVector {
            name: "owner bypasses role denies",
            server: server(Permissions::SEND_MESSAGES).with_role(muted()),
            member: Member::new("S", "OWNER").with_roles(["MUTED"]),
            query: Query::Server,
            expected: Permissions::all(),
        },
        ScenarioVector {
            name: "stronger role overrides weaker role",
            server: server(Permissions::VIEW_ONLY)
                .with_role(
                    Role::new("WEAK", "weak", 10)
                        .with_permissions(PermissionOverride::denying(Permissions::KICK_MEMBERS)),
                )
                .with_role(
                    Role::new("STRONG", "strong", 0)
                        .with_permissions(PermissionOverride::allowing(Permissions::KICK_MEMBERS)),
                ),
            member: Member::new("S", "U").with_roles(["STRONG", "WEAK"]),
            query: Query::Server,
            expected: Permissions::VIEW_ONLY | Permissions::KICK_MEMBERS,
        },
        ScenarioVector {
            name: "dangling role id is ignored",
            server: server(Permissions::VIEW_ONLY),
            member: Member::new("S", "U").with_roles(["GONE"]),
            query: Query::Server,
            expected: Permissions::VIEW_ONLY,
        },
        ScenarioVector {
            name: "active timeout clamps to the allow-list",
            server: server(Permissions::DEFAULT_SERVER),
            member: Member::new("S", "U").with_timeout(fixed_now() + Duration::hours(1)),
            query: Query::Server,
            expected: Permissions::ALLOW_IN_TIMEOUT,
        },
        ScenarioVector {
            name: "expired timeout has no effect",
            server: server(Permissions::DEFAULT_SERVER),
            member: Member::new("S", "U").with_timeout(fixed_now() - Duration::hours(1)),
            query: Query::Server,
            expected: Permissions::DEFAULT_SERVER,
        },
        ScenarioVector {
            name: "channel role override grants what the server withholds",
            server: server(Permissions::VIEW_ONLY).with_role(Role::new("MOD", "mod", 1)),
            member: Member::new("S", "U").with_roles(["MOD"]),
            query: Query::Channel(
                ServerChannel::new("C", "S", "general")
                    .with_role_permissions("MOD", PermissionOverride::allowing(Permissions::MANAGE_CHANNEL)),
            ),
            expected: Permissions::VIEW_ONLY | Permissions::MANAGE_CHANNEL,
        },
        ScenarioVector {
            name: "channel default deny applies to everyone",
            server: server(Permissions::VIEW_ONLY | Permissions::SEND_MESSAGES),
            member: Member::new("S", "U"),
            query: Query::Channel(
                ServerChannel::new("C", "S", "announcements")
                    .with_default_permissions(PermissionOverride::denying(Permissions::SEND_MESSAGES)),
            ),
            expected: Permissions::VIEW_ONLY,
        },
        ScenarioVector {
            name: "owner ignores channel denies",
            server: server(Permissions::VIEW_ONLY),
            member: Member::new("S", "OWNER"),
            query: Query::Channel(
                ServerChannel::new("C", "S", "locked")
                    .with_default_permissions(PermissionOverride::denying(Permissions::all())),
            ),
            expected: Permissions::all(),
        },
        ScenarioVector {
            name: "direct message with a friend",
            server: server(Permissions::empty()),
            member: Member::new("S", "U"),
            query: Query::DirectMessage(RelationshipStatus::Friend),
            expected: Permissions::DEFAULT_DM,
        },
        ScenarioVector {
            name: "blocked direct message is view only",
            server: server(Permissions::empty()),
            member: Member::new("S", "U"),
            query: Query::DirectMessage(RelationshipStatus::Blocked),
            expected: Permissions::VIEW_ONLY,
        },
    ]
}

/// Resolve every vector, returning `(name, matches, actual)` for each.
pub fn verify_all_vectors() -> Vec<(String, bool, Permissions)> {
    all_vectors()
        .iter()
        .map(|v| {
            let actual = v.resolve();
            (v.name.to_string(), actual == v.expected, actual)
        })
        .collect()
}
