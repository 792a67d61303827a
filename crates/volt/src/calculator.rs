//! The calculator: permission queries by id, resolved through a cache.
//!
//! [`PermissionCalculator`] looks up the entities a query needs and hands
//! them to the pure calculators in `volt_perms`. It answers from the point
//! of view of one user, `me`, whose cached relationships drive the direct
//! message and user-to-user rules.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;
use volt_cache::Cache;
use volt_core::{
    Channel, ChannelId, DirectMessageChannel, Member, MemberId, Permissions, RelationshipStatus,
    Server, ServerChannel, ServerId, User, UserId, UserPermissions,
};
use volt_perms::{
    calculate_dm_channel_permissions, calculate_group_channel_permissions,
    calculate_saved_messages_channel_permissions, calculate_server_channel_permissions_for_user,
    calculate_server_channel_permissions_with, calculate_server_permissions_with,
    calculate_user_permissions, try_sort_member_roles, ResolveOptions,
};

use crate::error::{Result, VoltError};

/// How member role ids the server does not know are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleLookup {
    /// Skip them. The cache may lag behind the platform.
    #[default]
    Lenient,
    /// Fail with [`PermsError::UnknownRole`](volt_perms::PermsError::UnknownRole).
    Strict,
}

/// Configuration for the calculator.
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    /// Handling of dangling role ids.
    pub role_lookup: RoleLookup,
    /// Whether server owners bypass every rule.
    pub with_ownership: bool,
    /// Whether timeouts clamp permissions.
    pub include_timeout: bool,
    /// Source of the current time for timeout checks.
    pub clock: fn() -> DateTime<Utc>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            role_lookup: RoleLookup::Lenient,
            with_ownership: true,
            include_timeout: true,
            clock: Utc::now,
        }
    }
}

impl CalculatorConfig {
    fn options(&self) -> ResolveOptions {
        ResolveOptions {
            with_ownership: self.with_ownership,
            include_timeout: self.include_timeout,
        }
    }
}

/// Permission queries for one user's view of the platform.
pub struct PermissionCalculator<C: Cache> {
    /// The user whose relationships are cached.
    me: UserId,
    /// The entity cache.
    cache: Arc<C>,
    /// Configuration.
    config: CalculatorConfig,
}

impl<C: Cache> PermissionCalculator<C> {
    /// Create a calculator for `me` over `cache`.
    pub fn new(me: impl Into<UserId>, cache: C, config: CalculatorConfig) -> Self {
        Self::with_shared_cache(me, Arc::new(cache), config)
    }

    /// Create a calculator over a cache that something else keeps writing to.
    pub fn with_shared_cache(me: impl Into<UserId>, cache: Arc<C>, config: CalculatorConfig) -> Self {
        Self {
            me: me.into(),
            cache,
            config,
        }
    }

    pub fn me(&self) -> &UserId {
        &self.me
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    fn now(&self) -> DateTime<Utc> {
        (self.config.clock)()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────────

    fn server(&self, id: &ServerId) -> Result<Server> {
        self.cache
            .get_server(id)?
            .ok_or_else(|| VoltError::no_data("server", id))
    }

    fn channel(&self, id: &ChannelId) -> Result<Channel> {
        self.cache
            .get_channel(id)?
            .ok_or_else(|| VoltError::no_data("channel", id))
    }

    fn user(&self, id: &UserId) -> Result<User> {
        self.cache
            .get_user(id)?
            .ok_or_else(|| VoltError::no_data("user", id))
    }

    fn member(&self, server_id: &ServerId, user_id: &UserId) -> Result<Option<Member>> {
        let id = MemberId {
            server: server_id.clone(),
            user: user_id.clone(),
        };
        Ok(self.cache.get_member(&id)?)
    }

    /// In strict mode, fail if the member holds a role the server lacks.
    fn check_roles(&self, server: &Server, member: &Member) -> Result<()> {
        if self.config.role_lookup == RoleLookup::Lenient
            || (self.config.with_ownership && server.is_owner(member.user_id()))
        {
            return Ok(());
        }

        if let Err(err) = try_sort_member_roles(member, server) {
            warn!(server = %server.id, user = %member.user_id(), error = %err, "strict role lookup failed");
            return Err(err.into());
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// A member's permissions across a server.
    pub fn server_permissions(&self, server_id: &ServerId, user_id: &UserId) -> Result<Permissions> {
        let server = self.server(server_id)?;
        let member = self
            .member(server_id, user_id)?
            .ok_or_else(|| VoltError::no_data("member", format!("{server_id}/{user_id}")))?;

        self.check_roles(&server, &member)?;
        Ok(calculate_server_permissions_with(
            &server,
            &member,
            self.now(),
            self.config.options(),
        ))
    }

    /// A user's permissions in a channel of any kind.
    ///
    /// In a server channel, a user without a cached membership gets what
    /// the server and channel defaults grant. In a direct message that `me`
    /// is not part of, the relationship between the recipients is unknown
    /// and the query fails with [`VoltError::NoData`].
    pub fn channel_permissions(&self, channel_id: &ChannelId, user_id: &UserId) -> Result<Permissions> {
        match self.channel(channel_id)? {
            Channel::SavedMessages(channel) => {
                Ok(calculate_saved_messages_channel_permissions(&channel, user_id))
            }
            Channel::DirectMessage(channel) => self.dm_permissions(&channel, user_id),
            Channel::Group(channel) => Ok(calculate_group_channel_permissions(&channel, user_id)),
            Channel::Text(channel) | Channel::Voice(channel) => {
                let server = self.server(&channel.server_id)?;
                match self.member(&channel.server_id, user_id)? {
                    Some(member) => self.member_permissions_in(&server, &channel, &member),
                    None => Ok(calculate_server_channel_permissions_for_user(
                        &server, &channel, user_id,
                    )),
                }
            }
        }
    }

    /// A member's permissions in a server channel, using the given member
    /// snapshot instead of the cached one.
    pub fn member_channel_permissions(&self, member: &Member, channel_id: &ChannelId) -> Result<Permissions> {
        let channel = self.channel(channel_id)?;
        let channel = channel.as_server_channel().ok_or_else(|| {
            VoltError::Mismatch(format!("{} channel {channel_id} has no members", channel.kind()))
        })?;
        if &channel.server_id != member.server_id() {
            return Err(VoltError::Mismatch(format!(
                "member of server {} queried in channel {channel_id} of server {}",
                member.server_id(),
                channel.server_id
            )));
        }

        let server = self.server(&channel.server_id)?;
        self.member_permissions_in(&server, channel, member)
    }

    fn member_permissions_in(
        &self,
        server: &Server,
        channel: &ServerChannel,
        member: &Member,
    ) -> Result<Permissions> {
        self.check_roles(server, member)?;
        Ok(calculate_server_channel_permissions_with(
            server,
            channel,
            member,
            self.now(),
            self.config.options(),
        ))
    }

    /// The relationship on the other side of a DM decides; users outside the
    /// conversation get nothing.
    ///
    /// Relationships are only known between `me` and other users, so asking
    /// about a DM where neither recipient is `me` fails with
    /// [`VoltError::NoData`].
    fn dm_permissions(&self, channel: &DirectMessageChannel, user_id: &UserId) -> Result<Permissions> {
        if channel.recipient_ids.len() > 2 {
            return Err(VoltError::Mismatch(format!(
                "direct message {} has {} recipients",
                channel.id,
                channel.recipient_ids.len()
            )));
        }
        if !channel.recipient_ids.contains(user_id) {
            return Ok(Permissions::empty());
        }

        // Relationships are cached from `me`'s side. Blocking and pending
        // requests look the same from either side.
        let relationship = match channel.other_recipient(user_id) {
            None => RelationshipStatus::SelfUser,
            Some(other) if user_id == &self.me => self.user(other)?.relationship,
            Some(other) if other == &self.me => self.user(user_id)?.relationship,
            Some(other) => {
                return Err(VoltError::no_data("relationship", format!("{user_id}/{other}")));
            }
        };

        Ok(calculate_dm_channel_permissions(channel, relationship))
    }

    /// What `me` may do to another user.
    pub fn user_permissions(&self, user_id: &UserId) -> Result<UserPermissions> {
        let me = self.user(&self.me)?;
        let target = self.user(user_id)?;
        Ok(calculate_user_permissions(&me, &target, target.relationship))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pre-flight checks
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether `user_id` holds all of `required` in the channel.
    pub fn has_channel_permissions(
        &self,
        channel_id: &ChannelId,
        user_id: &UserId,
        required: Permissions,
    ) -> Result<bool> {
        Ok(self.channel_permissions(channel_id, user_id)?.has(required))
    }

    /// Fail with [`VoltError::MissingPermissions`] unless `user_id` holds all
    /// of `required` in the channel.
    pub fn require_channel_permissions(
        &self,
        channel_id: &ChannelId,
        user_id: &UserId,
        required: Permissions,
    ) -> Result<()> {
        let held = self.channel_permissions(channel_id, user_id)?;
        require(held, required)
    }

    /// Fail with [`VoltError::MissingPermissions`] unless `user_id` holds all
    /// of `required` across the server.
    pub fn require_server_permissions(
        &self,
        server_id: &ServerId,
        user_id: &UserId,
        required: Permissions,
    ) -> Result<()> {
        let held = self.server_permissions(server_id, user_id)?;
        require(held, required)
    }
}

fn require(held: Permissions, required: Permissions) -> Result<()> {
    let missing = held.missing(required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(VoltError::MissingPermissions { required, missing })
    }
}
