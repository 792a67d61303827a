//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use volt_cache::{Cache, CacheError, MemoryCache};
use volt_core::{
    Channel, Member, PermissionOverride, Permissions, RelationshipStatus, Role, Server,
    ServerChannel, ServerId, User, UserId,
};

/// The instant every fixture treats as "now": 2024-06-01T12:00:00Z.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_717_243_200, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// A test fixture: one server in a memory cache, plus helpers to populate it.
pub struct TestFixture {
    pub server_id: ServerId,
    pub owner_id: UserId,
    pub cache: MemoryCache,
}

impl TestFixture {
    /// A server `S` owned by `OWNER` with the given default permissions.
    pub fn new(default_permissions: Permissions) -> Self {
        let server = Server::new("S", "OWNER", "fixture").with_default_permissions(default_permissions);
        let fixture = Self {
            server_id: server.id.clone(),
            owner_id: server.owner_id.clone(),
            cache: MemoryCache::new(),
        };
        fixture.must(fixture.cache.upsert_server(server));
        fixture
    }

    fn must(&self, result: Result<(), CacheError>) {
        if let Err(err) = result {
            panic!("fixture cache write failed: {err}");
        }
    }

    /// Add a role to the server.
    pub fn role(self, id: &str, rank: i64, layer: PermissionOverride) -> Self {
        let role = Role::new(id, id.to_lowercase(), rank).with_permissions(layer);
        self.must(self.cache.upsert_role(&self.server_id, role));
        self
    }

    /// Add a member holding `roles`.
    pub fn member(self, user: &str, roles: &[&str]) -> Self {
        let member = Member::new(self.server_id.clone(), user).with_roles(roles.iter().copied());
        self.must(self.cache.upsert_member(member));
        self
    }

    /// Add a member under a timeout until `until`.
    pub fn timed_out_member(self, user: &str, until: DateTime<Utc>) -> Self {
        let member = Member::new(self.server_id.clone(), user).with_timeout(until);
        self.must(self.cache.upsert_member(member));
        self
    }

    /// Add a text channel with per-role overrides.
    pub fn text_channel(
        self,
        id: &str,
        default: Option<PermissionOverride>,
        role_layers: &[(&str, PermissionOverride)],
    ) -> Self {
        let mut channel = ServerChannel::new(id, self.server_id.clone(), id.to_lowercase());
        channel.default_permissions = default;
        for (role_id, layer) in role_layers {
            channel = channel.with_role_permissions(*role_id, *layer);
        }
        self.must(self.cache.upsert_channel(Channel::Text(channel)));
        self
    }

    /// Add a user, with `relationship` as seen by the calculating user.
    pub fn user(self, id: &str, relationship: RelationshipStatus) -> Self {
        let user = User::new(id, id.to_lowercase()).with_relationship(relationship);
        self.must(self.cache.upsert_user(user));
        self
    }

    /// Consume the fixture, keeping only the cache.
    pub fn into_cache(self) -> MemoryCache {
        self.cache
    }
}

/// A batch of entities in their wire form.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Write every entity into `cache`.
    pub fn load_into<C: Cache + ?Sized>(self, cache: &C) -> Result<(), CacheError> {
        for server in self.servers {
            cache.upsert_server(server)?;
        }
        for member in self.members {
            cache.upsert_member(member)?;
        }
        for channel in self.channels {
            cache.upsert_channel(channel)?;
        }
        for user in self.users {
            cache.upsert_user(user)?;
        }
        Ok(())
    }
}

/// A small server as the platform would send it: two roles, a moderator,
/// an ordinary member, and an announcements channel only moderators may post in.
pub const SAMPLE_SNAPSHOT: &str = r#"{
    "servers": [{
        "_id": "01HZ0SERVER00000000000000",
        "owner": "01HZ0OWNER000000000000000",
        "name": "Sample",
        "default_permissions": 7340032,
        "roles": {
            "01HZ0ROLEMOD0000000000000": {
                "name": "Moderator",
                "permissions": { "a": 8388608, "d": 0 },
                "hoist": true,
                "rank": 1
            },
            "01HZ0ROLEMEMBER0000000000": {
                "name": "Member",
                "permissions": { "a": 536870912, "d": 0 },
                "rank": 5
            }
        }
    }],
    "members": [
        {
            "_id": { "server": "01HZ0SERVER00000000000000", "user": "01HZ0MOD00000000000000000" },
            "roles": ["01HZ0ROLEMOD0000000000000", "01HZ0ROLEMEMBER0000000000"]
        },
        {
            "_id": { "server": "01HZ0SERVER00000000000000", "user": "01HZ0USER0000000000000000" },
            "roles": ["01HZ0ROLEMEMBER0000000000"]
        }
    ],
    "channels": [{
        "channel_type": "TextChannel",
        "_id": "01HZ0CHANNEL0000000000000",
        "server": "01HZ0SERVER00000000000000",
        "name": "announcements",
        "default_permissions": { "a": 0, "d": 4194304 },
        "role_permissions": {
            "01HZ0ROLEMOD0000000000000": { "a": 4194304, "d": 0 }
        }
    }]
}"#;
