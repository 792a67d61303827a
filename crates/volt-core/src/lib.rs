//! # Volt Core
//!
//! Pure primitives for Volt: identifiers, permission masks, and read-only
//! snapshots of the platform's entities.
//!
//! This crate contains no I/O, no caching, no networking. Entities decode
//! from the platform's JSON wire format with serde and are otherwise plain
//! data.
//!
//! ## Key Types
//!
//! - [`Permissions`] - 64-bit channel/server permission mask
//! - [`UserPermissions`] - what the current user may do to another user
//! - [`PermissionOverride`] - an `{allow, deny}` layer
//! - [`Server`], [`Role`], [`Member`] - server membership
//! - [`Channel`] - one of the five channel kinds
//! - [`User`], [`RelationshipStatus`] - users and how they relate

pub mod channel;
pub mod error;
pub mod flags;
pub mod member;
pub mod overrides;
pub mod server;
pub mod types;
pub mod user;

pub use channel::{
    Channel, ChannelKind, DirectMessageChannel, GroupChannel, SavedMessagesChannel, ServerChannel,
};
pub use error::{CoreError, Result};
pub use flags::{Permissions, UserPermissions};
pub use member::{Member, MemberId};
pub use overrides::PermissionOverride;
pub use server::{Role, Server};
pub use types::{ChannelId, RoleId, ServerId, UserId};
pub use user::{BotInformation, RelationshipStatus, User};
