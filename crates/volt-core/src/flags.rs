//! Permission bitmasks.
//!
//! Channel/server permissions are a 64-bit field laid out by the platform:
//! - Generic (bits 0-4): channel, server, permission, role and
//!   customisation management
//! - Member (bits 6-13): moderation and profile permissions
//! - Channel (bits 20-29, 37-38): viewing, messaging and mentions
//! - Voice (bits 30-36): connecting, speaking and voice moderation
//!
//! Bits the library does not know about are kept as-is when decoded so that
//! a newer platform version does not lose information on a round trip
//! through the cache.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::overrides::PermissionOverride;

bitflags! {
    /// Channel and server permissions represented as a 64-bit bitfield.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        // === Generic (bits 0-4) ===
        /// Edit, delete or create channels. Also the "Manage Channel" override.
        const MANAGE_CHANNEL       = 1 << 0;
        /// Edit server properties
        const MANAGE_SERVER        = 1 << 1;
        /// Manage permissions on the server or its channels
        const MANAGE_PERMISSIONS   = 1 << 2;
        /// Manage roles on the server
        const MANAGE_ROLE          = 1 << 3;
        /// Manage server customisation, including emoji
        const MANAGE_CUSTOMISATION = 1 << 4;

        // === Member (bits 6-13) ===
        /// Kick members ranked below
        const KICK_MEMBERS         = 1 << 6;
        /// Ban members ranked below
        const BAN_MEMBERS          = 1 << 7;
        /// Time out members ranked below
        const TIMEOUT_MEMBERS      = 1 << 8;
        /// Assign roles ranked below to members ranked below
        const ASSIGN_ROLES         = 1 << 9;
        /// Change own nickname
        const CHANGE_NICKNAME      = 1 << 10;
        /// Change or remove nicknames of members ranked below
        const MANAGE_NICKNAMES     = 1 << 11;
        /// Change own server avatar
        const CHANGE_AVATAR        = 1 << 12;
        /// Remove server avatars of members ranked below
        const REMOVE_AVATARS       = 1 << 13;

        // === Channel (bits 20-29) ===
        /// View a channel
        const VIEW_CHANNEL         = 1 << 20;
        /// Read past message history
        const READ_MESSAGE_HISTORY = 1 << 21;
        /// Send messages
        const SEND_MESSAGES        = 1 << 22;
        /// Delete or pin other users' messages
        const MANAGE_MESSAGES      = 1 << 23;
        /// Manage the channel's webhooks
        const MANAGE_WEBHOOKS      = 1 << 24;
        /// Create invites to the channel
        const INVITE_OTHERS        = 1 << 25;
        /// Send embedded content
        const SEND_EMBEDS          = 1 << 26;
        /// Send attachments and media
        const UPLOAD_FILES         = 1 << 27;
        /// Masquerade own messages with a custom name and avatar
        const MASQUERADE           = 1 << 28;
        /// React to messages
        const REACT                = 1 << 29;

        // === Voice (bits 30-36) ===
        /// Connect to a voice channel
        const CONNECT              = 1 << 30;
        /// Speak in a voice call
        const SPEAK                = 1 << 31;
        /// Share video in a voice call
        const VIDEO                = 1 << 32;
        /// Mute members ranked below
        const MUTE_MEMBERS         = 1 << 33;
        /// Deafen members ranked below
        const DEAFEN_MEMBERS       = 1 << 34;
        /// Move members between voice channels
        const MOVE_MEMBERS         = 1 << 35;
        /// Listen to other users in a voice call
        const LISTEN               = 1 << 36;

        // === Mentions (bits 37-38) ===
        /// Mention everyone and online members
        const MENTION_EVERYONE     = 1 << 37;
        /// Mention roles
        const MENTION_ROLES        = 1 << 38;
    }
}

impl Permissions {
    // === Categories ===

    /// Generic management permissions.
    pub const GENERIC: Self = Self::from_bits_retain(0b1_1111);

    /// Member-related permissions.
    pub const MEMBER: Self = Self::from_bits_retain(0b0011_1111_1100_0000);

    /// Channel-related permissions, including mentions.
    pub const CHANNEL: Self = Self::from_bits_retain(0x0060_3FF0_0000);

    /// Voice-related permissions.
    pub const VOICE: Self = Self::from_bits_retain(0x001F_C000_0000);

    // === Preset Combinations ===

    /// What a timed-out member keeps: looking, not touching.
    pub const ALLOW_IN_TIMEOUT: Self = Self::VIEW_CHANNEL.union(Self::READ_MESSAGE_HISTORY);

    /// Read-only access to a channel.
    pub const VIEW_ONLY: Self = Self::VIEW_CHANNEL.union(Self::READ_MESSAGE_HISTORY);

    /// Baseline granted in most contexts.
    pub const DEFAULT: Self = Self::VIEW_ONLY
        .union(Self::SEND_MESSAGES)
        .union(Self::INVITE_OTHERS)
        .union(Self::SEND_EMBEDS)
        .union(Self::UPLOAD_FILES)
        .union(Self::CONNECT)
        .union(Self::SPEAK)
        .union(Self::LISTEN);

    /// Default permissions in direct messages and groups without an
    /// explicit permission value.
    pub const DEFAULT_DM: Self = Self::DEFAULT.union(Self::MANAGE_CHANNEL).union(Self::REACT);

    /// Default permissions of a freshly created server.
    pub const DEFAULT_SERVER: Self = Self::DEFAULT
        .union(Self::REACT)
        .union(Self::CHANGE_NICKNAME)
        .union(Self::CHANGE_AVATAR);

    /// Permissions in one's own saved messages channel.
    pub const DEFAULT_SAVED_MESSAGES: Self = Self::all();

    // === Permission Checking ===

    /// Check if this permission set includes the specified permission(s).
    ///
    /// # Examples
    ///
    /// ```
    /// use volt_core::Permissions;
    ///
    /// let perms = Permissions::SEND_MESSAGES | Permissions::CONNECT;
    /// assert!(perms.has(Permissions::SEND_MESSAGES));
    /// assert!(!perms.has(Permissions::BAN_MEMBERS));
    /// ```
    #[must_use]
    pub const fn has(self, permission: Self) -> bool {
        self.contains(permission)
    }

    /// The subset of `required` that this set lacks.
    #[must_use]
    pub const fn missing(self, required: Self) -> Self {
        required.difference(self)
    }

    /// Layer an override on top of these permissions.
    ///
    /// Equivalent to [`PermissionOverride::apply`].
    #[must_use]
    pub const fn apply_override(self, layer: &PermissionOverride) -> Self {
        layer.apply(self)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<u64> for Permissions {
    type Error = CoreError;

    /// Strict conversion: rejects bits that have no named permission.
    fn try_from(bits: u64) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or(CoreError::UnknownPermissionBits(
            bits & !Self::all().bits(),
        ))
    }
}

// The wire form is a bare integer. bitflags' own serde support would emit
// flag names for human-readable formats, which the platform does not accept.
impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

bitflags! {
    /// What the current user may do to another user, independent of any
    /// channel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UserPermissions: u32 {
        /// Access the user's data at all
        const ACCESS       = 1 << 0;
        /// View the user's profile
        const VIEW_PROFILE = 1 << 1;
        /// Send the user direct messages
        const SEND_MESSAGE = 1 << 2;
        /// Invite the user to groups
        const INVITE       = 1 << 3;
    }
}

impl UserPermissions {
    /// Check if this permission set includes the specified permission(s).
    #[must_use]
    pub const fn has(self, permission: Self) -> bool {
        self.contains(permission)
    }
}

impl Default for UserPermissions {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for UserPermissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for UserPermissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Self::from_bits_retain)
    }
}
