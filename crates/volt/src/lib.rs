//! # Volt
//!
//! Client-side permission calculation for the Volt chat platform.
//!
//! ## Overview
//!
//! A client needs to know what the current user may do before it shows a
//! button or sends a request. The platform defines that as a layering of
//! server defaults, role overrides, channel overrides, timeouts and
//! relationships. This crate reproduces it locally from cached entities.
//!
//! - **Servers**: default permissions plus ranked roles
//! - **Channels**: saved messages, direct messages, groups, text and voice
//! - **Users**: relationship-based permissions between two users
//!
//! ## Usage
//!
//! ```rust
//! use volt::{CalculatorConfig, PermissionCalculator};
//! use volt::cache::{Cache, MemoryCache};
//! use volt::core::{Channel, ChannelId, Member, Permissions, Server, ServerChannel, UserId};
//!
//! let cache = MemoryCache::new();
//! cache.upsert_server(Server::new("S", "OWNER", "example")).unwrap();
//! cache.upsert_member(Member::new("S", "ME")).unwrap();
//! cache
//!     .upsert_channel(Channel::Text(ServerChannel::new("C", "S", "general")))
//!     .unwrap();
//!
//! let calc = PermissionCalculator::new("ME", cache, CalculatorConfig::default());
//! let can_send = calc
//!     .has_channel_permissions(&ChannelId::new("C"), &UserId::new("ME"), Permissions::SEND_MESSAGES)
//!     .unwrap();
//! assert!(can_send);
//! ```
//!
//! ## Re-exports
//!
//! - `volt::core` - Identifiers, permission masks and entity snapshots
//! - `volt::cache` - The cache seam and its in-memory implementation
//! - `volt::perms` - The pure calculators

pub mod calculator;
pub mod error;

// Re-export component crates
pub use volt_cache as cache;
pub use volt_core as core;
pub use volt_perms as perms;

pub use calculator::{CalculatorConfig, PermissionCalculator, RoleLookup};
pub use error::{Result, VoltError};

// Re-export commonly used core types
pub use volt_core::{
    Channel, ChannelId, Member, PermissionOverride, Permissions, RelationshipStatus, Role, Server,
    ServerId, User, UserId, UserPermissions,
};
