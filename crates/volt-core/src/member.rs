//! Server members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{RoleId, ServerId, UserId};

/// Composite key of a membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId {
    pub server: ServerId,
    pub user: UserId,
}

/// A member snapshot: one user's membership of one server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: MemberId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    /// Assigned role ids, in the order the platform lists them.
    #[serde(default)]
    pub roles: Vec<RoleId>,

    /// End of the member's moderation timeout, if one was ever set.
    #[serde(rename = "timeout", default, skip_serializing_if = "Option::is_none")]
    pub timeout_until: Option<DateTime<Utc>>,

    /// Whether the member may send voice data.
    #[serde(default = "yes")]
    pub can_publish: bool,

    /// Whether the member may receive voice data.
    #[serde(default = "yes")]
    pub can_receive: bool,
}

fn yes() -> bool {
    true
}

impl Member {
    /// Create a member with no roles and no timeout.
    pub fn new(server: impl Into<ServerId>, user: impl Into<UserId>) -> Self {
        Self {
            id: MemberId {
                server: server.into(),
                user: user.into(),
            },
            nickname: None,
            roles: Vec::new(),
            timeout_until: None,
            can_publish: true,
            can_receive: true,
        }
    }

    /// Assign roles.
    pub fn with_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RoleId>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Time the member out until `until`.
    pub fn with_timeout(mut self, until: DateTime<Utc>) -> Self {
        self.timeout_until = Some(until);
        self
    }

    pub fn server_id(&self) -> &ServerId {
        &self.id.server
    }

    pub fn user_id(&self) -> &UserId {
        &self.id.user
    }

    /// Whether the member is under a timeout at `now`.
    ///
    /// A timeout that has already ended does not count.
    pub fn is_timed_out(&self, now: DateTime<Utc>) -> bool {
        self.timeout_until.is_some_and(|until| until > now)
    }
}
