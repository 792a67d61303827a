//! Server-wide permissions for a member.

use chrono::{DateTime, Utc};
use tracing::trace;
use volt_core::{Member, Permissions, Server};

use crate::options::ResolveOptions;
use crate::roles::sort_member_roles;

/// Restrict a mask to what a timed-out member may still do.
pub const fn clamp_to_timeout(permissions: Permissions) -> Permissions {
    permissions.intersection(Permissions::ALLOW_IN_TIMEOUT)
}

/// Apply the member-level restrictions that sit on top of role layering:
/// the timeout clamp and the voice publish/receive switches.
pub(crate) fn restrict_member(
    mut permissions: Permissions,
    member: &Member,
    now: DateTime<Utc>,
    options: ResolveOptions,
) -> Permissions {
    if options.include_timeout && member.is_timed_out(now) {
        permissions = clamp_to_timeout(permissions);
    }
    if !member.can_publish {
        permissions.remove(Permissions::SPEAK);
    }
    if !member.can_receive {
        permissions.remove(Permissions::LISTEN);
    }
    permissions
}

/// Calculate a member's permissions across the whole server.
///
/// # Panics
///
/// If the member belongs to a different server.
pub fn calculate_server_permissions(
    server: &Server,
    member: &Member,
    now: DateTime<Utc>,
) -> Permissions {
    calculate_server_permissions_with(server, member, now, ResolveOptions::default())
}

/// [`calculate_server_permissions`] with explicit options.
pub fn calculate_server_permissions_with(
    server: &Server,
    member: &Member,
    now: DateTime<Utc>,
    options: ResolveOptions,
) -> Permissions {
    assert_eq!(member.server_id(), &server.id, "member of a different server");

    if options.with_ownership && server.is_owner(member.user_id()) {
        trace!(server = %server.id, user = %member.user_id(), "owner bypass");
        return Permissions::all();
    }

    let rolled_up = sort_member_roles(member, server)
        .into_iter()
        .fold(server.default_permissions, |acc, role| role.permissions.apply(acc));

    restrict_member(rolled_up, member, now, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use volt_core::{PermissionOverride, Role};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn server() -> Server {
        Server::new("S", "OWNER", "test").with_default_permissions(Permissions::SEND_MESSAGES)
    }

    #[test]
    fn test_no_roles_gets_server_default() {
        let server = server();
        let member = Member::new("S", "U");

        assert_eq!(
            calculate_server_permissions(&server, &member, now()),
            Permissions::SEND_MESSAGES
        );
    }

    #[test]
    fn test_role_deny_removes_default() {
        let server = server().with_role(
            Role::new("MUTED", "muted", 10)
                .with_permissions(PermissionOverride::denying(Permissions::SEND_MESSAGES)),
        );
        let member = Member::new("S", "U").with_roles(["MUTED"]);

        let perms = calculate_server_permissions(&server, &member, now());

        assert!(!perms.has(Permissions::SEND_MESSAGES));
    }

    #[test]
    fn test_owner_bypass() {
        let server = server().with_role(
            Role::new("MUTED", "muted", 10)
                .with_permissions(PermissionOverride::denying(Permissions::SEND_MESSAGES)),
        );
        let member = Member::new("S", "OWNER")
            .with_roles(["MUTED"])
            .with_timeout(now() + Duration::hours(1));

        assert_eq!(calculate_server_permissions(&server, &member, now()), Permissions::all());
    }

    #[test]
    fn test_owner_bypass_can_be_disabled() {
        let server = server();
        let member = Member::new("S", "OWNER");

        let perms =
            calculate_server_permissions_with(&server, &member, now(), ResolveOptions::roles_only());

        assert_eq!(perms, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn test_stronger_role_wins() {
        // rank 0 outranks rank 10 and is applied last
        let server = server()
            .with_role(
                Role::new("STRONG", "strong", 0)
                    .with_permissions(PermissionOverride::allowing(Permissions::KICK_MEMBERS)),
            )
            .with_role(
                Role::new("WEAK", "weak", 10)
                    .with_permissions(PermissionOverride::denying(Permissions::KICK_MEMBERS)),
            );
        let member = Member::new("S", "U").with_roles(["STRONG", "WEAK"]);

        let perms = calculate_server_permissions(&server, &member, now());
        assert!(perms.has(Permissions::KICK_MEMBERS));

        let server = server
            .with_role(
                Role::new("STRONG", "strong", 0)
                    .with_permissions(PermissionOverride::denying(Permissions::KICK_MEMBERS)),
            )
            .with_role(
                Role::new("WEAK", "weak", 10)
                    .with_permissions(PermissionOverride::allowing(Permissions::KICK_MEMBERS)),
            );

        let perms = calculate_server_permissions(&server, &member, now());
        assert!(!perms.has(Permissions::KICK_MEMBERS));
    }

    #[test]
    fn test_active_timeout_clamps() {
        let server = server().with_role(
            Role::new("MOD", "mod", 1)
                .with_permissions(PermissionOverride::allowing(Permissions::VIEW_ONLY | Permissions::KICK_MEMBERS)),
        );
        let member = Member::new("S", "U")
            .with_roles(["MOD"])
            .with_timeout(now() + Duration::minutes(5));

        let perms = calculate_server_permissions(&server, &member, now());

        assert_eq!(perms, Permissions::ALLOW_IN_TIMEOUT);
    }

    #[test]
    fn test_expired_timeout_ignored() {
        let server = server();
        let member = Member::new("S", "U").with_timeout(now() - Duration::minutes(5));

        assert_eq!(
            calculate_server_permissions(&server, &member, now()),
            Permissions::SEND_MESSAGES
        );
    }

    #[test]
    fn test_timeout_ending_now_is_over() {
        let server = server();
        let member = Member::new("S", "U").with_timeout(now());

        assert_eq!(
            calculate_server_permissions(&server, &member, now()),
            Permissions::SEND_MESSAGES
        );
    }

    #[test]
    fn test_timeout_clamp_never_grants() {
        let server = server();
        let member = Member::new("S", "U").with_timeout(now() + Duration::days(1));

        // SEND_MESSAGES is not in the allow-list and VIEW_CHANNEL was never granted
        assert!(calculate_server_permissions(&server, &member, now()).is_empty());
    }

    #[test]
    fn test_clamp_idempotent() {
        let once = clamp_to_timeout(Permissions::all());
        assert_eq!(clamp_to_timeout(once), once);
    }

    #[test]
    fn test_voice_restrictions() {
        let server = Server::new("S", "OWNER", "test")
            .with_default_permissions(Permissions::CONNECT | Permissions::SPEAK | Permissions::LISTEN);
        let mut member = Member::new("S", "U");
        member.can_publish = false;

        let perms = calculate_server_permissions(&server, &member, now());
        assert_eq!(perms, Permissions::CONNECT | Permissions::LISTEN);

        member.can_publish = true;
        member.can_receive = false;

        let perms = calculate_server_permissions(&server, &member, now());
        assert_eq!(perms, Permissions::CONNECT | Permissions::SPEAK);
    }

    #[test]
    fn test_dangling_role_contributes_nothing() {
        let server = server();
        let member = Member::new("S", "U").with_roles(["GHOST"]);

        assert_eq!(
            calculate_server_permissions(&server, &member, now()),
            Permissions::SEND_MESSAGES
        );
    }

    #[test]
    #[should_panic(expected = "member of a different server")]
    fn test_foreign_member_rejected() {
        let member = Member::new("OTHER", "OWNER");
        calculate_server_permissions(&server(), &member, now());
    }
}
