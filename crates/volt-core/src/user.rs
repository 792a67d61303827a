//! Users and relationships.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// The current user's relationship with another user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipStatus {
    /// No relationship.
    #[default]
    None,

    /// The other user is the current user.
    #[serde(rename = "User")]
    SelfUser,

    Friend,

    /// Friend request sent to the other user.
    Outgoing,

    /// Friend request received from the other user.
    Incoming,

    /// The current user blocked the other user.
    Blocked,

    /// The other user blocked the current user.
    BlockedOther,
}

impl RelationshipStatus {
    /// Whether either side has blocked the other.
    pub const fn is_blocked(self) -> bool {
        matches!(self, RelationshipStatus::Blocked | RelationshipStatus::BlockedOther)
    }

    /// Whether a friend request is pending in either direction.
    pub const fn is_pending(self) -> bool {
        matches!(self, RelationshipStatus::Incoming | RelationshipStatus::Outgoing)
    }
}

/// Bot account details.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BotInformation {
    /// The user who owns the bot.
    #[serde(rename = "owner")]
    pub owner_id: UserId,
}

/// A user snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,

    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<BotInformation>,

    /// Platform staff; everyone may interact with them.
    #[serde(default)]
    pub privileged: bool,

    /// Relationship with the user this snapshot was fetched by.
    #[serde(default)]
    pub relationship: RelationshipStatus,
}

impl User {
    pub fn new(id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            bot: None,
            privileged: false,
            relationship: RelationshipStatus::None,
        }
    }

    pub fn with_relationship(mut self, relationship: RelationshipStatus) -> Self {
        self.relationship = relationship;
        self
    }

    /// Mark this user as a bot owned by `owner_id`.
    pub fn as_bot(mut self, owner_id: impl Into<UserId>) -> Self {
        self.bot = Some(BotInformation {
            owner_id: owner_id.into(),
        });
        self
    }

    pub fn is_bot(&self) -> bool {
        self.bot.is_some()
    }
}
