//! In-memory implementation of the Cache trait.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;
use volt_core::{Channel, ChannelId, Member, MemberId, Role, RoleId, Server, ServerId, User, UserId};

use crate::error::{CacheError, Result};
use crate::traits::Cache;

/// In-memory cache. Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct MemoryCache {
    inner: RwLock<MemoryCacheInner>,
}

#[derive(Debug, Default)]
struct MemoryCacheInner {
    servers: HashMap<ServerId, Server>,
    members: HashMap<MemberId, Member>,
    channels: HashMap<ChannelId, Channel>,
    users: HashMap<UserId, User>,
}

impl MemoryCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryCacheInner>> {
        self.inner.read().map_err(|_| CacheError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryCacheInner>> {
        self.inner.write().map_err(|_| CacheError::Poisoned)
    }
}

impl Cache for MemoryCache {
    fn get_server(&self, id: &ServerId) -> Result<Option<Server>> {
        Ok(self.read()?.servers.get(id).cloned())
    }

    fn get_member(&self, id: &MemberId) -> Result<Option<Member>> {
        Ok(self.read()?.members.get(id).cloned())
    }

    fn get_channel(&self, id: &ChannelId) -> Result<Option<Channel>> {
        Ok(self.read()?.channels.get(id).cloned())
    }

    fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.read()?.users.get(id).cloned())
    }

    fn upsert_server(&self, server: Server) -> Result<()> {
        self.write()?.servers.insert(server.id.clone(), server);
        Ok(())
    }

    fn upsert_role(&self, server_id: &ServerId, role: Role) -> Result<()> {
        let mut inner = self.write()?;
        let server = inner
            .servers
            .get_mut(server_id)
            .ok_or_else(|| CacheError::MissingServer(server_id.clone()))?;
        server.roles.insert(role.id.clone(), role);
        Ok(())
    }

    fn remove_role(&self, server_id: &ServerId, role_id: &RoleId) -> Result<Option<Role>> {
        let mut inner = self.write()?;
        let removed = inner
            .servers
            .get_mut(server_id)
            .and_then(|server| server.roles.remove(role_id));
        if removed.is_none() {
            debug!(server = %server_id, role = %role_id, "role not cached, nothing removed");
        }
        Ok(removed)
    }

    fn upsert_member(&self, member: Member) -> Result<()> {
        self.write()?.members.insert(member.id.clone(), member);
        Ok(())
    }

    fn remove_member(&self, id: &MemberId) -> Result<Option<Member>> {
        Ok(self.write()?.members.remove(id))
    }

    fn upsert_channel(&self, channel: Channel) -> Result<()> {
        self.write()?.channels.insert(channel.id().clone(), channel);
        Ok(())
    }

    fn remove_channel(&self, id: &ChannelId) -> Result<Option<Channel>> {
        Ok(self.write()?.channels.remove(id))
    }

    fn upsert_user(&self, user: User) -> Result<()> {
        self.write()?.users.insert(user.id.clone(), user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CacheExt;
    use std::sync::Arc;
    use volt_core::{Permissions, ServerChannel, UserId};

    fn populated() -> MemoryCache {
        let cache = MemoryCache::new();
        cache
            .upsert_server(
                Server::new("S", "OWNER", "test")
                    .with_role(Role::new("MOD", "mod", 1))
                    .with_role(Role::new("MEMBER", "member", 5)),
            )
            .unwrap();
        cache
            .upsert_member(Member::new("S", "U").with_roles(["MEMBER", "MOD"]))
            .unwrap();
        cache
            .upsert_channel(Channel::Text(ServerChannel::new("C", "S", "general")))
            .unwrap();
        cache
    }

    fn member_id() -> MemberId {
        MemberId {
            server: ServerId::new("S"),
            user: UserId::new("U"),
        }
    }

    #[test]
    fn test_empty_cache() {
        let cache = MemoryCache::new();
        assert!(cache.get_server(&ServerId::new("S")).unwrap().is_none());
        assert!(cache.get_user(&UserId::new("U")).unwrap().is_none());
    }

    #[test]
    fn test_upsert_replaces() {
        let cache = populated();
        cache
            .upsert_server(Server::new("S", "OWNER", "renamed").with_default_permissions(Permissions::empty()))
            .unwrap();

        let server = cache.get_server(&ServerId::new("S")).unwrap().unwrap();
        assert_eq!(server.name, "renamed");
        assert!(server.roles.is_empty());
    }

    #[test]
    fn test_upsert_role() {
        let cache = populated();
        let role = Role::new("MOD", "moderator", 2);
        cache.upsert_role(&ServerId::new("S"), role).unwrap();

        let server = cache.get_server(&ServerId::new("S")).unwrap().unwrap();
        assert_eq!(server.role(&RoleId::new("MOD")).unwrap().rank, 2);
    }

    #[test]
    fn test_upsert_role_needs_server() {
        let cache = MemoryCache::new();
        let err = cache
            .upsert_role(&ServerId::new("NOPE"), Role::new("R", "r", 0))
            .unwrap_err();

        assert_eq!(err, CacheError::MissingServer(ServerId::new("NOPE")));
    }

    #[test]
    fn test_remove_role_leaves_member_ids() {
        let cache = populated();
        let removed = cache.remove_role(&ServerId::new("S"), &RoleId::new("MOD")).unwrap();
        assert_eq!(removed.unwrap().name, "mod");

        let member = cache.get_member(&member_id()).unwrap().unwrap();
        assert!(member.roles.contains(&RoleId::new("MOD")));

        let roles = cache.member_roles(&ServerId::new("S"), &UserId::new("U")).unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].id, RoleId::new("MEMBER"));

        assert!(cache.remove_role(&ServerId::new("S"), &RoleId::new("MOD")).unwrap().is_none());
    }

    #[test]
    fn test_remove_member_and_channel() {
        let cache = populated();

        assert!(cache.remove_member(&member_id()).unwrap().is_some());
        assert!(cache.get_member(&member_id()).unwrap().is_none());

        let channel_id = ChannelId::new("C");
        assert!(cache.remove_channel(&channel_id).unwrap().is_some());
        assert!(cache.get_channel(&channel_id).unwrap().is_none());
    }

    #[test]
    fn test_server_of() {
        let cache = populated();
        let channel = cache.get_channel(&ChannelId::new("C")).unwrap().unwrap();

        let server = cache.server_of(&channel).unwrap().unwrap();
        assert_eq!(server.id, ServerId::new("S"));
    }

    #[test]
    fn test_member_roles_without_membership() {
        let cache = populated();
        let roles = cache.member_roles(&ServerId::new("S"), &UserId::new("STRANGER")).unwrap();
        assert!(roles.is_empty());
    }

    #[test]
    fn test_poisoned_lock_is_an_error() {
        let cache = Arc::new(populated());

        let poisoner = Arc::clone(&cache);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("writer died");
        })
        .join();

        assert_eq!(cache.get_server(&ServerId::new("S")).unwrap_err(), CacheError::Poisoned);
        assert_eq!(
            cache.upsert_user(User::new("U", "user")).unwrap_err(),
            CacheError::Poisoned
        );
    }

    #[test]
    fn test_concurrent_readers() {
        let cache = Arc::new(populated());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_member(&member_id()).unwrap().is_some())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
