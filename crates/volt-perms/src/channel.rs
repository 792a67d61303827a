//! Per-channel permissions.
//!
//! Server channels layer channel overrides on top of the member's server
//! permissions. The other channel kinds have no roles and resolve from the
//! channel and the user's relationship alone.

use chrono::{DateTime, Utc};
use tracing::trace;
use volt_core::{
    DirectMessageChannel, GroupChannel, Member, Permissions, RelationshipStatus,
    SavedMessagesChannel, Server, ServerChannel, UserId,
};

use crate::options::ResolveOptions;
use crate::roles::sort_member_roles;
use crate::server::{calculate_server_permissions_with, restrict_member};

/// Calculate a member's permissions in one of the server's channels.
///
/// # Panics
///
/// If the channel or the member belongs to a different server.
pub fn calculate_server_channel_permissions(
    server: &Server,
    channel: &ServerChannel,
    member: &Member,
    now: DateTime<Utc>,
) -> Permissions {
    calculate_server_channel_permissions_with(server, channel, member, now, ResolveOptions::default())
}

/// [`calculate_server_channel_permissions`] with explicit options.
pub fn calculate_server_channel_permissions_with(
    server: &Server,
    channel: &ServerChannel,
    member: &Member,
    now: DateTime<Utc>,
    options: ResolveOptions,
) -> Permissions {
    assert_eq!(channel.server_id, server.id, "channel of a different server");
    assert_eq!(member.server_id(), &server.id, "member of a different server");

    if options.with_ownership && server.is_owner(member.user_id()) {
        trace!(channel = %channel.id, user = %member.user_id(), "owner bypass");
        return Permissions::all();
    }

    let base = calculate_server_permissions_with(server, member, now, options);
    let mut result = channel
        .default_permissions
        .map_or(base, |layer| layer.apply(base));

    for role in sort_member_roles(member, server) {
        if let Some(layer) = channel.role_permissions.get(&role.id) {
            result = layer.apply(result);
        }
    }

    restrict_member(result, member, now, options)
}

/// Permissions in a server channel for a user who is not a member.
///
/// Only the server default and the channel's default override apply.
///
/// # Panics
///
/// If the channel belongs to a different server.
pub fn calculate_server_channel_permissions_for_user(
    server: &Server,
    channel: &ServerChannel,
    user_id: &UserId,
) -> Permissions {
    assert_eq!(channel.server_id, server.id, "channel of a different server");

    if server.is_owner(user_id) {
        return Permissions::all();
    }

    let base = server.default_permissions;
    channel.default_permissions.map_or(base, |layer| layer.apply(base))
}

/// Permissions in a direct message, given the relationship with the other recipient.
///
/// # Panics
///
/// If the channel has more than two recipients.
pub fn calculate_dm_channel_permissions(
    channel: &DirectMessageChannel,
    relationship: RelationshipStatus,
) -> Permissions {
    assert!(channel.recipient_ids.len() <= 2, "direct message with more than two recipients");

    if relationship.is_blocked() {
        Permissions::VIEW_ONLY
    } else {
        Permissions::DEFAULT_DM
    }
}

/// Permissions in a group for `user_id`.
///
/// The group owner has every permission. Other recipients can always view
/// and read history, plus whatever the group grants (the DM default when
/// unset). Users outside the group get nothing.
pub fn calculate_group_channel_permissions(channel: &GroupChannel, user_id: &UserId) -> Permissions {
    if &channel.owner_id == user_id {
        Permissions::all()
    } else if channel.is_recipient(user_id) {
        Permissions::VIEW_ONLY | channel.permissions.unwrap_or(Permissions::DEFAULT_DM)
    } else {
        Permissions::empty()
    }
}

/// Permissions in a saved messages channel: everything for its owner, nothing for anyone else.
pub fn calculate_saved_messages_channel_permissions(
    channel: &SavedMessagesChannel,
    user_id: &UserId,
) -> Permissions {
    if &channel.user_id == user_id {
        Permissions::DEFAULT_SAVED_MESSAGES
    } else {
        Permissions::empty()
    }
}
