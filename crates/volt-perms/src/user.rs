//! What the current user may do to another user.

use volt_core::{RelationshipStatus, User, UserPermissions};

/// Calculate what `me` may do to `target`, given their relationship.
///
/// | relationship                    | result     |
/// |---------------------------------|------------|
/// | privileged target, self, friend | everything |
/// | blocked either way              | access     |
/// | incoming or outgoing            | access     |
/// | none                            | nothing    |
///
/// Outside the blocked case, anyone may message a bot and a bot may message anyone.
pub fn calculate_user_permissions(
    me: &User,
    target: &User,
    relationship: RelationshipStatus,
) -> UserPermissions {
    if target.privileged
        || me.id == target.id
        || matches!(relationship, RelationshipStatus::SelfUser | RelationshipStatus::Friend)
    {
        return UserPermissions::all();
    }

    if relationship.is_blocked() {
        return UserPermissions::ACCESS;
    }

    let mut permissions = UserPermissions::empty();
    if relationship.is_pending() {
        permissions |= UserPermissions::ACCESS;
    }
    if me.is_bot() || target.is_bot() {
        permissions |= UserPermissions::SEND_MESSAGE;
    }
    permissions
}
