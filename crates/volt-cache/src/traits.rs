//! Cache trait: the interface the permission calculator reads entities through.
//!
//! The calculator never fetches anything itself. Whatever keeps the client's
//! view of the platform up to date (an event stream, REST responses, a test
//! fixture) writes into a [`Cache`], and calculations read snapshots back out.

use volt_core::{Channel, ChannelId, Member, MemberId, Role, RoleId, Server, ServerId, User, UserId};

use crate::error::Result;

/// Read and write access to cached entities.
///
/// Getters return owned snapshots so that a calculation works on a
/// consistent copy even if the cache is updated mid-way.
pub trait Cache: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    fn get_server(&self, id: &ServerId) -> Result<Option<Server>>;

    fn get_member(&self, id: &MemberId) -> Result<Option<Member>>;

    fn get_channel(&self, id: &ChannelId) -> Result<Option<Channel>>;

    fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert or replace a server, roles included.
    fn upsert_server(&self, server: Server) -> Result<()>;

    /// Insert or replace one role of a cached server.
    ///
    /// Fails with [`CacheError::MissingServer`](crate::CacheError::MissingServer)
    /// if the server is not cached.
    fn upsert_role(&self, server_id: &ServerId, role: Role) -> Result<()>;

    /// Remove a role from a cached server.
    ///
    /// Members holding the role keep its id.
    fn remove_role(&self, server_id: &ServerId, role_id: &RoleId) -> Result<Option<Role>>;

    fn upsert_member(&self, member: Member) -> Result<()>;

    fn remove_member(&self, id: &MemberId) -> Result<Option<Member>>;

    fn upsert_channel(&self, channel: Channel) -> Result<()>;

    fn remove_channel(&self, id: &ChannelId) -> Result<Option<Channel>>;

    fn upsert_user(&self, user: User) -> Result<()>;
}

/// Conveniences built on [`Cache`].
pub trait CacheExt: Cache {
    /// The server a channel belongs to, if it is a server channel and the
    /// server is cached.
    fn server_of(&self, channel: &Channel) -> Result<Option<Server>> {
        match channel.server_id() {
            Some(server_id) => self.get_server(server_id),
            None => Ok(None),
        }
    }

    /// The roles a member holds that the cached server knows about, in the
    /// member's own order.
    fn member_roles(&self, server_id: &ServerId, user_id: &UserId) -> Result<Vec<Role>> {
        let Some(server) = self.get_server(server_id)? else {
            return Ok(Vec::new());
        };
        let member_id = MemberId {
            server: server_id.clone(),
            user: user_id.clone(),
        };
        let Some(member) = self.get_member(&member_id)? else {
            return Ok(Vec::new());
        };

        Ok(member
            .roles
            .iter()
            .filter_map(|role_id| server.role(role_id).cloned())
            .collect())
    }
}

impl<C: Cache + ?Sized> CacheExt for C {}
