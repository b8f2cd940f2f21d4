//! Scenario tests for the ability rule table, grouped by the kind of subject.

mod common;

use common::Fixture;
use teamguard::auth::{
    AccessToken, Ability, Action, Application, AuthError, FeatureFlags, Invitation, Membership,
    ResourceKind, Role, StaticFlags, StripeAccount, StripeInstallation, Subscription, Team,
};
use teamguard::config::FeaturesConfig;
use teamguard::Feature;

mod team_member {
    use super::*;

    fn setup() -> (Fixture, teamguard::auth::User, Team, Membership) {
        let fx = Fixture::new();
        let team = Team::new("Shared");
        let user = fx.user("member").with_current_team(team.id.clone());
        let membership = fx.add_member(&user, &team, &[]);
        (fx, user, team, membership)
    }

    #[test]
    fn can_manage_their_account() {
        let (fx, user, _, _) = setup();
        assert!(Ability::new(&user, &fx.store).can(Action::Manage, &user));
    }

    #[test]
    fn cannot_manage_foreign_account() {
        let (fx, user, _, _) = setup();
        let another = fx.user("another");
        assert!(Ability::new(&user, &fx.store).cannot(Action::Manage, &another));
    }

    #[test]
    fn can_manage_self_with_team_context() {
        let (fx, user, _, _) = setup();
        let ability = Ability::new(&user, &fx.store);
        let fresh_team = Team::default();
        assert!(ability.can_with(Action::Manage, &user, Some((&fresh_team).into())));
    }

    #[test]
    fn reads_but_does_not_manage_their_team() {
        let (fx, user, team, _) = setup();
        let ability = Ability::new(&user, &fx.store);
        assert!(ability.can(Action::Read, &team));
        assert!(ability.cannot(Action::Update, &team));
        assert!(ability.cannot(Action::Manage, &team));
    }

    #[test]
    fn cannot_destroy_their_membership() {
        let (fx, user, team, membership) = setup();
        let ability = Ability::new(&user, &fx.store);
        assert!(ability.cannot(Action::Destroy, &membership));

        let unsaved_own = Membership::unsaved().with_user(user.id.clone()).with_team(team.id);
        assert!(ability.cannot(Action::Destroy, &unsaved_own));
    }

    #[test]
    fn cannot_invite_without_admin_role() {
        let (fx, user, team, _) = setup();
        let ability = Ability::new(&user, &fx.store);
        let invitation = Invitation::new(team.id.clone(), "new@example.com");
        assert!(ability.can(Action::Read, &invitation));
        assert!(ability.cannot(Action::Create, &invitation));
        assert!(!ability.can_kind(Action::Create, ResourceKind::Invitation));
    }
}

mod non_team_member {
    use super::*;

    #[test]
    fn can_manage_their_account() {
        let fx = Fixture::new();
        let user = fx.user("loner");
        assert!(Ability::new(&user, &fx.store).can(Action::Manage, &user));
    }

    #[test]
    fn cannot_manage_foreign_account() {
        let fx = Fixture::new();
        let user = fx.user("loner");
        let another = fx.user("another");
        assert!(Ability::new(&user, &fx.store).cannot(Action::Manage, &another));
    }

    #[test]
    fn cannot_manage_team() {
        let fx = Fixture::new();
        let user = fx.user("loner");
        let (_, team) = fx.onboarded_user("owner");
        let ability = Ability::new(&user, &fx.store);

        assert!(ability.cannot(Action::Manage, &team));
        assert!(ability.cannot(Action::Read, &team));
        assert!(ability.cannot(Action::Manage, &Team::default()));
    }

    #[test]
    fn cannot_manage_membership() {
        let fx = Fixture::new();
        let user = fx.user("loner");
        let ability = Ability::new(&user, &fx.store);
        assert!(ability.cannot(Action::Manage, &Membership::unsaved()));
    }

    #[test]
    fn has_no_accessible_teams() {
        let fx = Fixture::new();
        let user = fx.user("loner");
        let ability = Ability::new(&user, &fx.store);
        assert!(ability.accessible_team_ids(Action::Read, ResourceKind::Team).is_empty());
        assert!(ability.administered_team_ids().is_empty());
    }
}

mod team_admin {
    use super::*;

    #[test]
    fn can_manage_team() {
        let fx = Fixture::new();
        let (admin, team) = fx.onboarded_user("admin");
        assert!(Ability::new(&admin, &fx.store).can(Action::Manage, &team));
    }

    #[test]
    fn can_manage_membership_of_current_team() {
        let fx = Fixture::new();
        let (admin, team) = fx.onboarded_user("admin");
        let ability = Ability::new(&admin, &fx.store);

        assert!(ability.can(Action::Manage, &Membership::unsaved().with_team(team.id.clone())));

        let bob = fx.user("bob");
        let bobs = fx.add_member(&bob, &team, &[]);
        assert!(ability.can(Action::Destroy, &bobs));
    }

    #[test]
    fn can_manage_but_not_destroy_own_membership() {
        let fx = Fixture::new();
        let (admin, team) = fx.onboarded_user("admin");
        let ability = Ability::new(&admin, &fx.store);
        let own = Membership::unsaved().with_user(admin.id.clone()).with_team(team.id);

        assert!(ability.can(Action::Manage, &own));
        assert!(ability.cannot(Action::Destroy, &own));
        assert!(matches!(
            ability.authorize(Action::Destroy, &own),
            Err(AuthError::Forbidden { action: Action::Destroy, kind: ResourceKind::Membership })
        ));
    }

    #[test]
    fn admin_rights_do_not_cross_tenants() {
        let fx = Fixture::new();
        let (admin, _) = fx.onboarded_user("admin");
        let (_, foreign) = fx.onboarded_user("rival");
        let ability = Ability::new(&admin, &fx.store);

        assert!(ability.cannot(Action::Read, &foreign));
        assert!(ability.cannot(Action::Manage, &Membership::unsaved().with_team(foreign.id)));
    }

    #[test]
    fn lists_administered_and_accessible_teams() {
        let fx = Fixture::new();
        let (admin, own) = fx.onboarded_user("admin");
        let (_, other) = fx.onboarded_user("other");
        fx.add_member(&admin, &other, &[]);
        let ability = Ability::new(&admin, &fx.store);

        assert_eq!(ability.administered_team_ids(), vec![own.id.clone()]);

        let mut readable = vec![own.id.clone(), other.id.clone()];
        readable.sort();
        assert_eq!(ability.accessible_team_ids(Action::Read, ResourceKind::Team), readable);
        assert_eq!(ability.accessible_team_ids(Action::Update, ResourceKind::Team), vec![own.id]);
    }
}

mod billing {
    use super::*;

    #[test]
    fn subscription_rules_follow_the_billing_flag() {
        let fx = Fixture::new();
        let (user, team) = fx.onboarded_user("payer");
        let subscription = Subscription::new(team.id.clone(), "pro");

        let disabled = FeaturesConfig::default();
        let ability = Ability::new(&user, &fx.store).with_features(&disabled);
        assert!(ability.can(Action::Read, &user));
        assert!(ability.cannot(Action::Read, &subscription));
        assert!(ability.accessible_team_ids(Action::Read, ResourceKind::Subscription).is_empty());

        let enabled = FeaturesConfig { billing: true, ..Default::default() };
        assert!(enabled.is_enabled(Feature::Billing));
        let ability = Ability::new(&user, &fx.store).with_features(&enabled);
        assert!(ability.can(Action::Manage, &subscription));
        assert_eq!(
            ability.accessible_team_ids(Action::Manage, ResourceKind::Subscription),
            vec![team.id]
        );
    }

    #[test]
    fn members_only_read_subscriptions() {
        let fx = Fixture::new();
        let (_, team) = fx.onboarded_user("payer");
        let member = fx.user("member");
        fx.add_member(&member, &team, &[]);
        let enabled = StaticFlags(true);
        let ability = Ability::new(&member, &fx.store).with_features(&enabled);
        let subscription = Subscription::new(team.id, "pro");

        assert!(ability.can(Action::Read, &subscription));
        assert!(ability.cannot(Action::Update, &subscription));
    }
}

mod developer {
    use super::*;

    #[test]
    fn developer_manages_self_and_applications_only() {
        let fx = Fixture::new();
        let team = Team::new("Platform");
        let developer = fx.user("dev");
        fx.add_member(&developer, &team, &[Role::Developer]);
        let ability = Ability::new(&developer, &fx.store);
        let app = Application::new(team.id.clone(), "cli");

        assert!(ability.can(Action::Manage, &developer));
        assert!(ability.can(Action::Manage, &app));
        assert!(ability.can(Action::Read, &team));
        assert!(ability.cannot(Action::Manage, &team));
        assert!(ability.cannot(Action::Manage, &AccessToken::new(app, true)));
        assert!(ability.can_kind(Action::Create, ResourceKind::Application));
    }
}

mod stripe_integration {
    use super::*;

    #[test]
    fn stripe_abilities_when_stripe_is_enabled() {
        let fx = Fixture::new();
        let (user, team) = fx.onboarded_user("merchant");
        let flags = FeaturesConfig { stripe_integration: true, ..Default::default() };
        let ability = Ability::new(&user, &fx.store).with_features(&flags);
        let account = StripeAccount::new(user.id.clone(), "acct_test123");

        assert!(ability.can(Action::Read, &account));
        assert!(ability.can(Action::Create, &account));
        assert!(ability.can(Action::Destroy, &account));
        assert!(ability.can(Action::Manage, &StripeInstallation::new(team.id)));
        assert!(ability.can_kind(Action::Create, ResourceKind::StripeAccount));
    }

    #[test]
    fn stripe_abilities_when_stripe_is_disabled() {
        let fx = Fixture::new();
        let (user, team) = fx.onboarded_user("merchant");
        let account = StripeAccount::new(user.id.clone(), "acct_test123");

        let no_flags = Ability::new(&user, &fx.store);
        assert!(no_flags.cannot(Action::Read, &account));
        assert!(no_flags.cannot(Action::Manage, &StripeInstallation::new(team.id.clone())));
        assert!(!no_flags.can_kind(Action::Create, ResourceKind::StripeAccount));

        let off = FeaturesConfig::default();
        let disabled = Ability::new(&user, &fx.store).with_features(&off);
        assert!(disabled.cannot(Action::Create, &account));
    }

    #[test]
    fn other_users_accounts_are_off_limits() {
        let fx = Fixture::new();
        let (user, _) = fx.onboarded_user("merchant");
        let (rival, rival_team) = fx.onboarded_user("rival");
        let flags = StaticFlags(true);
        let ability = Ability::new(&user, &fx.store).with_features(&flags);

        assert!(ability.cannot(Action::Read, &StripeAccount::new(rival.id, "acct_rival")));
        assert!(ability.cannot(Action::Manage, &StripeInstallation::new(rival_team.id)));
    }
}

mod platform_access_tokens {
    use super::*;

    #[test]
    fn can_manage_provisioned_access_tokens() {
        let fx = Fixture::new();
        let (user, team) = fx.onboarded_user("builder");
        let token = AccessToken::new(Application::new(team.id, "deploys"), true);
        assert!(Ability::new(&user, &fx.store).can(Action::Manage, &token));
    }

    #[test]
    fn cannot_manage_non_provisioned_access_tokens() {
        let fx = Fixture::new();
        let (user, team) = fx.onboarded_user("builder");
        let token = AccessToken::new(Application::new(team.id, "deploys"), false);
        let ability = Ability::new(&user, &fx.store);
        assert!(ability.cannot(Action::Manage, &token));
        assert!(ability.cannot(Action::Read, &token));
    }

    #[test]
    fn tokens_of_other_teams_are_denied() {
        let fx = Fixture::new();
        let (user, _) = fx.onboarded_user("builder");
        let (_, foreign) = fx.onboarded_user("rival");
        let token = AccessToken::new(Application::new(foreign.id, "deploys"), true);
        assert!(Ability::new(&user, &fx.store).cannot(Action::Manage, &token));
    }
}

mod invitations {
    use super::*;

    #[test]
    fn can_manage_team_invitations() {
        let fx = Fixture::new();
        let (user, team) = fx.onboarded_user("host");
        let invitation = Invitation::new(team.id, "guest@example.com");
        let ability = Ability::new(&user, &fx.store);
        assert!(ability.can(Action::Manage, &invitation));
        assert!(ability.authorize(Action::Create, &invitation).is_ok());
    }

    #[test]
    fn cannot_manage_invitations_from_other_teams() {
        let fx = Fixture::new();
        let (user, _) = fx.onboarded_user("host");
        let other_team = Team::new("Other");
        let invitation = Invitation::new(other_team.id, "guest@example.com");
        let ability = Ability::new(&user, &fx.store);

        assert!(ability.cannot(Action::Manage, &invitation));
        let err = ability.authorize(Action::Manage, &invitation).unwrap_err();
        assert!(err.is_forbidden());
    }
}

mod collaborating_users {
    use super::*;

    #[test]
    fn can_read_users_sharing_a_team() {
        let fx = Fixture::new();
        let (user, team) = fx.onboarded_user("lead");
        let collaborator = fx.user("collaborator");
        fx.add_member(&collaborator, &team, &[]);
        let ability = Ability::new(&user, &fx.store);

        assert!(ability.can(Action::Read, &user));
        assert!(ability.can(Action::Read, &collaborator));
        assert!(ability.cannot(Action::Update, &collaborator));
    }

    #[test]
    fn cannot_read_strangers() {
        let fx = Fixture::new();
        let (user, _) = fx.onboarded_user("lead");
        let (stranger, _) = fx.onboarded_user("stranger");
        assert!(Ability::new(&user, &fx.store).cannot(Action::Read, &stranger));
    }
}

mod lifecycle {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn fresh_ability_sees_promotion_stale_one_does_not() {
        let fx = Fixture::new();
        let team = Team::new("Growing");
        let user = fx.user("rookie");
        fx.add_member(&user, &team, &[]);

        let stale = Ability::new(&user, &fx.store);
        assert!(stale.cannot(Action::Manage, &team));

        fx.store.grant_role(&user.id, &team.id, Role::Admin).unwrap();

        let fresh = Ability::new(&user, &fx.store);
        assert!(fresh.can(Action::Manage, &team));
        assert!(stale.cannot(Action::Manage, &team));
    }

    #[test]
    fn repeated_checks_are_identical() {
        let fx = Fixture::new();
        let (user, team) = fx.onboarded_user("steady");
        let ability = Ability::new(&user, &fx.store);
        let first: Vec<bool> = Action::ALL.iter().map(|a| ability.can(*a, &team)).collect();
        for _ in 0..10 {
            let again: Vec<bool> = Action::ALL.iter().map(|a| ability.can(*a, &team)).collect();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn concurrent_checks_with_per_thread_abilities() {
        let fx = Arc::new(Fixture::new());
        let (admin, team) = fx.onboarded_user("admin");
        let outsider = fx.user("outsider");
        let admin = Arc::new(admin);
        let outsider = Arc::new(outsider);
        let team = Arc::new(team);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let fx = Arc::clone(&fx);
                let admin = Arc::clone(&admin);
                let outsider = Arc::clone(&outsider);
                let team = Arc::clone(&team);
                thread::spawn(move || {
                    if i % 2 == 0 {
                        Ability::new(admin.as_ref(), &fx.store).can(Action::Manage, team.as_ref())
                    } else {
                        Ability::new(outsider.as_ref(), &fx.store)
                            .cannot(Action::Manage, team.as_ref())
                    }
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
