//! Ordering a member's roles for layering.
//!
//! Roles are applied weakest first so that the strongest role (lowest rank)
//! has the last word. Roles of equal rank are applied in ascending id order.

use std::cmp::Ordering;

use tracing::debug;
use volt_core::{Member, Role, Server};

use crate::error::{PermsError, Result};

/// Layering order: descending rank, then ascending id.
fn layering_order(a: &&Role, b: &&Role) -> Ordering {
    b.rank.cmp(&a.rank).then_with(|| a.id.cmp(&b.id))
}

/// Resolve a member's role ids against the server, in layering order.
///
/// Ids the server does not know are skipped. Duplicate ids appear once.
pub fn sort_member_roles<'a>(member: &Member, server: &'a Server) -> Vec<&'a Role> {
    let mut roles: Vec<&Role> = member
        .roles
        .iter()
        .filter_map(|role_id| {
            let role = server.role(role_id);
            if role.is_none() {
                debug!(server = %server.id, role = %role_id, "skipping role missing from server");
            }
            role
        })
        .collect();

    roles.sort_by(layering_order);
    roles.dedup_by(|a, b| a.id == b.id);
    roles
}

/// Like [`sort_member_roles`], but fails on the first id the server does not know.
pub fn try_sort_member_roles<'a>(member: &Member, server: &'a Server) -> Result<Vec<&'a Role>> {
    let mut roles = member
        .roles
        .iter()
        .map(|role_id| {
            server.role(role_id).ok_or_else(|| PermsError::UnknownRole {
                server_id: server.id.clone(),
                role_id: role_id.clone(),
            })
        })
        .collect::<Result<Vec<&Role>>>()?;

    roles.sort_by(layering_order);
    roles.dedup_by(|a, b| a.id == b.id);
    Ok(roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use volt_core::RoleId;

    fn server() -> Server {
        Server::new("S", "OWNER", "test")
            .with_role(Role::new("ADMIN", "admin", 0))
            .with_role(Role::new("MOD", "mod", 5))
            .with_role(Role::new("MEMBER", "member", 10))
            .with_role(Role::new("ALSO_MOD", "also mod", 5))
    }

    fn ids(roles: &[&Role]) -> Vec<String> {
        roles.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_sort_weakest_first() {
        let server = server();
        let member = Member::new("S", "U").with_roles(["ADMIN", "MEMBER", "MOD"]);

        let roles = sort_member_roles(&member, &server);

        assert_eq!(ids(&roles), ["MEMBER", "MOD", "ADMIN"]);
    }

    #[test]
    fn test_equal_rank_breaks_by_id() {
        let server = server();
        let member = Member::new("S", "U").with_roles(["MOD", "ALSO_MOD"]);

        let roles = sort_member_roles(&member, &server);

        assert_eq!(ids(&roles), ["ALSO_MOD", "MOD"]);
    }

    #[test]
    fn test_unknown_roles_skipped() {
        let server = server();
        let member = Member::new("S", "U").with_roles(["GHOST", "MOD"]);

        let roles = sort_member_roles(&member, &server);

        assert_eq!(ids(&roles), ["MOD"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let server = server();
        let member = Member::new("S", "U").with_roles(["MOD", "MOD", "MEMBER"]);

        let roles = sort_member_roles(&member, &server);

        assert_eq!(ids(&roles), ["MEMBER", "MOD"]);
    }

    #[test]
    fn test_no_roles() {
        let server = server();
        let member = Member::new("S", "U");

        assert!(sort_member_roles(&member, &server).is_empty());
    }

    #[test]
    fn test_strict_lookup_reports_unknown_role() {
        let server = server();
        let member = Member::new("S", "U").with_roles(["MOD", "GHOST"]);

        let err = try_sort_member_roles(&member, &server).unwrap_err();

        assert_eq!(
            err,
            PermsError::UnknownRole {
                server_id: server.id.clone(),
                role_id: RoleId::new("GHOST"),
            }
        );
    }

    #[test]
    fn test_strict_lookup_matches_lenient_when_all_known() {
        let server = server();
        let member = Member::new("S", "U").with_roles(["ADMIN", "MOD", "MEMBER"]);

        let strict = try_sort_member_roles(&member, &server).unwrap();

        assert_eq!(ids(&strict), ids(&sort_member_roles(&member, &server)));
    }
}
