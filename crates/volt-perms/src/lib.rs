//! # Volt Permissions
//!
//! Pure permission calculators over entity snapshots.
//!
//! ## Overview
//!
//! Every calculator is a synchronous function of its inputs. Nothing is
//! fetched and nothing is mutated, so calculators can run concurrently on
//! shared snapshots. The current time is passed in rather than read from the
//! clock.
//!
//! ## Layering
//!
//! Server permissions start from the server default. Each of the member's
//! roles is then applied as an `{allow, deny}` layer, weakest role first
//! (highest `rank`), so the strongest role has the last word. Deny wins
//! within a single layer.
//!
//! Server channels continue from there: the channel's default override, then
//! the channel's overrides for each held role, in the same order.
//!
//! Timed-out members are clamped to [`Permissions::ALLOW_IN_TIMEOUT`]. The
//! server owner bypasses all of it.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Utc;
//! use volt_core::{Member, PermissionOverride, Permissions, Role, Server};
//! use volt_perms::calculate_server_permissions;
//!
//! let server = Server::new("S", "OWNER", "example")
//!     .with_default_permissions(Permissions::SEND_MESSAGES)
//!     .with_role(
//!         Role::new("MUTED", "muted", 10)
//!             .with_permissions(PermissionOverride::denying(Permissions::SEND_MESSAGES)),
//!     );
//! let member = Member::new("S", "U").with_roles(["MUTED"]);
//!
//! let perms = calculate_server_permissions(&server, &member, Utc::now());
//! assert!(!perms.has(Permissions::SEND_MESSAGES));
//! ```

pub mod channel;
pub mod error;
pub mod options;
pub mod roles;
pub mod server;
pub mod user;

pub use channel::{
    calculate_dm_channel_permissions, calculate_group_channel_permissions,
    calculate_saved_messages_channel_permissions, calculate_server_channel_permissions,
    calculate_server_channel_permissions_for_user, calculate_server_channel_permissions_with,
};
pub use error::{PermsError, Result};
pub use options::ResolveOptions;
pub use roles::{sort_member_roles, try_sort_member_roles};
pub use server::{calculate_server_permissions, calculate_server_permissions_with, clamp_to_timeout};
pub use user::calculate_user_permissions;
