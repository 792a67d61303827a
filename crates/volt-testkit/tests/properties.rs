//! Layering properties checked over generated servers.

use chrono::Duration;
use proptest::prelude::*;

use volt_core::{DirectMessageChannel, PermissionOverride, Permissions, Role, UserId};
use volt_perms::{
    calculate_dm_channel_permissions, calculate_server_channel_permissions,
    calculate_server_permissions, calculate_server_permissions_with, clamp_to_timeout,
    ResolveOptions,
};
use volt_testkit::generators::{permission_override, permissions, relationship, ServerParams};
use volt_testkit::{fixed_now, ScenarioVector};

proptest! {
    #[test]
    fn owner_gets_everything(params: ServerParams) {
        let ServerParams { server, member, channel } = params.owned();

        prop_assert_eq!(calculate_server_permissions(&server, &member, fixed_now()), Permissions::all());
        prop_assert_eq!(
            calculate_server_channel_permissions(&server, &channel, &member, fixed_now()),
            Permissions::all()
        );
    }

    #[test]
    fn no_roles_means_server_default(params: ServerParams) {
        let ServerParams { server, member, .. } = params.without_roles();
        let result = calculate_server_permissions(&server, &member, fixed_now());

        if member.is_timed_out(fixed_now()) {
            prop_assert_eq!(result, clamp_to_timeout(server.default_permissions));
        } else {
            prop_assert_eq!(result, server.default_permissions);
        }
    }

    #[test]
    fn empty_override_is_noop(base in permissions()) {
        prop_assert_eq!(PermissionOverride::EMPTY.apply(base), base);
    }

    #[test]
    fn deny_wins_within_one_layer(base in permissions(), bits in permissions()) {
        let layer = PermissionOverride::new(bits, bits);
        prop_assert!(!layer.apply(base).intersects(bits));
    }

    #[test]
    fn later_layer_decides_contested_bits(params: ServerParams, bits in permissions()) {
        let ServerParams { server, member, .. } = params.without_roles();
        let server = server
            .with_role(Role::new("LOW", "low", 100).with_permissions(PermissionOverride::denying(bits)))
            .with_role(Role::new("HIGH", "high", -100).with_permissions(PermissionOverride::allowing(bits)));
        let granted = member.clone().with_roles(["LOW", "HIGH"]);

        let result = calculate_server_permissions_with(&server, &granted, fixed_now(), ResolveOptions::roles_only());
        prop_assert!(result.contains(bits));

        let server = server
            .with_role(Role::new("LOW", "low", 100).with_permissions(PermissionOverride::allowing(bits)))
            .with_role(Role::new("HIGH", "high", -100).with_permissions(PermissionOverride::denying(bits)));

        let result = calculate_server_permissions_with(&server, &granted, fixed_now(), ResolveOptions::roles_only());
        prop_assert!(!result.intersects(bits));
    }

    #[test]
    fn timeout_clamp_is_idempotent_and_never_grants(base in permissions()) {
        let once = clamp_to_timeout(base);
        prop_assert_eq!(clamp_to_timeout(once), once);
        prop_assert!(base.contains(once));
    }

    #[test]
    fn timed_out_members_stay_within_allow_list(params: ServerParams) {
        let ServerParams { server, mut member, channel } = params;
        member.timeout_until = Some(fixed_now() + Duration::seconds(1));

        let in_server = calculate_server_permissions(&server, &member, fixed_now());
        let in_channel = calculate_server_channel_permissions(&server, &channel, &member, fixed_now());

        prop_assert!(Permissions::ALLOW_IN_TIMEOUT.contains(in_server));
        prop_assert!(Permissions::ALLOW_IN_TIMEOUT.contains(in_channel));
    }

    #[test]
    fn channel_without_overrides_matches_server(params: ServerParams, layer in permission_override()) {
        let ServerParams { server, member, mut channel } = params;
        channel.default_permissions = None;
        channel.role_permissions.clear();

        let in_server = calculate_server_permissions(&server, &member, fixed_now());
        prop_assert_eq!(
            calculate_server_channel_permissions(&server, &channel, &member, fixed_now()),
            in_server
        );

        // an override on a role nobody holds changes nothing
        channel = channel.with_role_permissions("NOBODY", layer);
        prop_assert_eq!(
            calculate_server_channel_permissions(&server, &channel, &member, fixed_now()),
            in_server
        );
    }

    #[test]
    fn dm_stays_between_view_only_and_default(relationship in relationship()) {
        let channel = DirectMessageChannel {
            id: "DM".into(),
            active: true,
            recipient_ids: vec![UserId::new("U"), ScenarioVector::counterpart()],
        };

        let result = calculate_dm_channel_permissions(&channel, relationship);
        prop_assert!(Permissions::DEFAULT_DM.contains(result));
        prop_assert!(result.contains(Permissions::VIEW_ONLY));
    }
}
