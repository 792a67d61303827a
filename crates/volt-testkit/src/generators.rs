//! Proptest generators for property-based testing.

use chrono::Duration;
use proptest::prelude::*;

use volt_core::{
    Member, PermissionOverride, Permissions, RelationshipStatus, Role, Server, ServerChannel,
};

use crate::fixtures::fixed_now;

/// Any 64-bit mask, unknown bits included.
pub fn permissions() -> impl Strategy<Value = Permissions> {
    any::<u64>().prop_map(Permissions::from_bits_retain)
}

/// Masks made only of named permissions.
pub fn named_permissions() -> impl Strategy<Value = Permissions> {
    any::<u64>().prop_map(Permissions::from_bits_truncate)
}

/// An `{allow, deny}` layer over named permissions.
pub fn permission_override() -> impl Strategy<Value = PermissionOverride> {
    (named_permissions(), named_permissions())
        .prop_map(|(allow, deny)| PermissionOverride::new(allow, deny))
}

/// Every relationship variant.
pub fn relationship() -> impl Strategy<Value = RelationshipStatus> {
    prop_oneof![
        Just(RelationshipStatus::None),
        Just(RelationshipStatus::SelfUser),
        Just(RelationshipStatus::Friend),
        Just(RelationshipStatus::Outgoing),
        Just(RelationshipStatus::Incoming),
        Just(RelationshipStatus::Blocked),
        Just(RelationshipStatus::BlockedOther),
    ]
}

/// No timeout, an expired one, or an active one, relative to [`fixed_now`].
pub fn timeout() -> impl Strategy<Value = Option<chrono::DateTime<chrono::Utc>>> {
    prop_oneof![
        Just(None),
        (1i64..=10_000).prop_map(|mins| Some(fixed_now() - Duration::minutes(mins))),
        (1i64..=10_000).prop_map(|mins| Some(fixed_now() + Duration::minutes(mins))),
    ]
}

/// A server, one of its members, and a text channel in it.
#[derive(Debug, Clone)]
pub struct ServerParams {
    pub server: Server,
    pub member: Member,
    pub channel: ServerChannel,
}

impl ServerParams {
    /// The same scenario with the member as the server owner.
    pub fn owned(mut self) -> Self {
        self.member.id.user = self.server.owner_id.clone();
        self
    }

    /// The same scenario with the member holding no roles.
    pub fn without_roles(mut self) -> Self {
        self.member.roles.clear();
        self
    }
}

impl Arbitrary for ServerParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            named_permissions(),                                            // server default
            prop::collection::vec((-5i64..=20, permission_override()), 0..6), // roles
            prop::collection::vec(any::<prop::sample::Index>(), 0..6),      // held roles
            any::<bool>(),                                                  // dangling role
            prop::option::of(permission_override()),                        // channel default
            prop::collection::vec(permission_override(), 0..6),             // channel role layers
            timeout(),
        )
            .prop_map(
                |(default, roles, held, dangling, channel_default, layers, timeout_until)| {
                    let mut server = Server::new("S", "OWNER", "generated").with_default_permissions(default);
                    let mut channel = ServerChannel::new("C", "S", "generated");
                    channel.default_permissions = channel_default;

                    let role_ids: Vec<String> = (0..roles.len()).map(|i| format!("R{i}")).collect();
                    for (id, (rank, layer)) in role_ids.iter().zip(roles) {
                        server = server.with_role(Role::new(id.as_str(), id.as_str(), rank).with_permissions(layer));
                    }
                    for (id, layer) in role_ids.iter().zip(layers) {
                        channel = channel.with_role_permissions(id.as_str(), layer);
                    }

                    let mut member_roles: Vec<String> = if role_ids.is_empty() {
                        Vec::new()
                    } else {
                        held.iter().map(|index| index.get(&role_ids).clone()).collect()
                    };
                    if dangling {
                        member_roles.push("GONE".to_string());
                    }

                    let mut member = Member::new("S", "U").with_roles(member_roles);
                    member.timeout_until = timeout_until;

                    ServerParams {
                        server,
                        member,
                        channel,
                    }
                },
            )
            .boxed()
    }
}
