//! Channels.
//!
//! A channel is one of five kinds, tagged on the wire by `channel_type`.
//! Text and voice channels belong to a server and share [`ServerChannel`];
//! the other three are private.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flags::Permissions;
use crate::overrides::PermissionOverride;
use crate::types::{ChannelId, RoleId, ServerId, UserId};

/// A channel snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel_type")]
pub enum Channel {
    /// Personal notes channel.
    SavedMessages(SavedMessagesChannel),

    /// Conversation between exactly two users.
    DirectMessage(DirectMessageChannel),

    /// Private group of one or more users.
    Group(GroupChannel),

    #[serde(rename = "TextChannel")]
    Text(ServerChannel),

    #[serde(rename = "VoiceChannel")]
    Voice(ServerChannel),
}

/// Discriminator for [`Channel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    SavedMessages,
    DirectMessage,
    Group,
    Text,
    Voice,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelKind::SavedMessages => "saved messages",
            ChannelKind::DirectMessage => "direct message",
            ChannelKind::Group => "group",
            ChannelKind::Text => "text",
            ChannelKind::Voice => "voice",
        };
        f.write_str(name)
    }
}

impl Channel {
    pub fn id(&self) -> &ChannelId {
        match self {
            Channel::SavedMessages(c) => &c.id,
            Channel::DirectMessage(c) => &c.id,
            Channel::Group(c) => &c.id,
            Channel::Text(c) | Channel::Voice(c) => &c.id,
        }
    }

    pub fn kind(&self) -> ChannelKind {
        match self {
            Channel::SavedMessages(_) => ChannelKind::SavedMessages,
            Channel::DirectMessage(_) => ChannelKind::DirectMessage,
            Channel::Group(_) => ChannelKind::Group,
            Channel::Text(_) => ChannelKind::Text,
            Channel::Voice(_) => ChannelKind::Voice,
        }
    }

    /// The owning server, for text and voice channels.
    pub fn server_id(&self) -> Option<&ServerId> {
        self.as_server_channel().map(|c| &c.server_id)
    }

    pub fn as_server_channel(&self) -> Option<&ServerChannel> {
        match self {
            Channel::Text(c) | Channel::Voice(c) => Some(c),
            _ => None,
        }
    }
}

/// A user's saved messages channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMessagesChannel {
    #[serde(rename = "_id")]
    pub id: ChannelId,

    /// The user the channel belongs to.
    #[serde(rename = "user")]
    pub user_id: UserId,
}

/// A direct message channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessageChannel {
    #[serde(rename = "_id")]
    pub id: ChannelId,

    /// Whether the conversation is open on both sides.
    #[serde(default)]
    pub active: bool,

    #[serde(rename = "recipients")]
    pub recipient_ids: Vec<UserId>,
}

impl DirectMessageChannel {
    /// The participant who is not `me`.
    pub fn other_recipient(&self, me: &UserId) -> Option<&UserId> {
        self.recipient_ids.iter().find(|id| *id != me)
    }
}

/// A group channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupChannel {
    #[serde(rename = "_id")]
    pub id: ChannelId,

    pub name: String,

    #[serde(rename = "owner")]
    pub owner_id: UserId,

    #[serde(rename = "recipients")]
    pub recipient_ids: Vec<UserId>,

    /// Permissions granted to every recipient. Absent means the DM defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}

impl GroupChannel {
    pub fn is_recipient(&self, user_id: &UserId) -> bool {
        self.recipient_ids.contains(user_id)
    }
}

/// A text or voice channel inside a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerChannel {
    #[serde(rename = "_id")]
    pub id: ChannelId,

    #[serde(rename = "server")]
    pub server_id: ServerId,

    pub name: String,

    /// Override applied to everyone before any role overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_permissions: Option<PermissionOverride>,

    /// Per-role overrides.
    #[serde(default)]
    pub role_permissions: HashMap<RoleId, PermissionOverride>,
}

impl ServerChannel {
    /// Create a channel with no overrides.
    pub fn new(id: impl Into<ChannelId>, server_id: impl Into<ServerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            server_id: server_id.into(),
            name: name.into(),
            default_permissions: None,
            role_permissions: HashMap::new(),
        }
    }

    /// Set the override applied to everyone.
    pub fn with_default_permissions(mut self, layer: PermissionOverride) -> Self {
        self.default_permissions = Some(layer);
        self
    }

    /// Set the override for one role.
    pub fn with_role_permissions(mut self, role_id: impl Into<RoleId>, layer: PermissionOverride) -> Self {
        self.role_permissions.insert(role_id.into(), layer);
        self
    }
}
