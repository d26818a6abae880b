//! Integration tests for role-based access control and permission resolution.
//!
//! Tests cover:
//! - Role hierarchy predicates
//! - Scoped permission resolution
//! - Admin bypass
//! - Fail-closed handling of absent or unrecognized sessions
//! - Capability hooks across session changes
//! - Concurrent derivation from one session

mod common;

use common::{session_at, session_for, store_for, ALL_ROLES};
use medsupply_access::auth::{is_admin, is_customer, is_sales_manager_or_above, role_display_name};
use medsupply_access::{
    build_permission, has_minimum_role, Action, AuthSession, Context, CustomerCapabilities,
    PermissionCheck, Resource, Role, RoleLevel, SessionStore, UserPermissions,
};
use std::thread;
use strum::IntoEnumIterator;
use uuid::Uuid;

// ==================== Role Hierarchy Tests ====================

#[test]
fn test_minimum_role_scenarios() {
    assert!(!has_minimum_role(None, RoleLevel::ADMIN));
    assert!(has_minimum_role(Some(RoleLevel(200)), RoleLevel(200)));
    assert!(has_minimum_role(Some(RoleLevel::ADMIN), RoleLevel::FULFILLMENT_COORDINATOR));
    assert!(!has_minimum_role(Some(RoleLevel::SALES_REP), RoleLevel::SALES_MANAGER));
}

#[test]
fn test_named_predicates_follow_levels() {
    assert!(is_admin(Some(RoleLevel::ADMIN)));
    assert!(is_sales_manager_or_above(Some(RoleLevel::FULFILLMENT_COORDINATOR)));
    assert!(is_customer(Some(RoleLevel::CUSTOMER)));
    assert!(!is_customer(Some(RoleLevel::SALES_REP)));
    assert_eq!(role_display_name(Some(RoleLevel::SALES_MANAGER)), "Sales Manager");
    assert_eq!(role_display_name(Some(RoleLevel(-7))), "Unknown");
}

// ==================== Permission Resolution Tests ====================

#[test]
fn test_sales_rep_assigned_quotes() {
    let perms = UserPermissions::derive(Some(&session_for(Role::SalesRep)));

    assert!(perms.has_permission(Resource::Quotes, Action::Read, Some(Context::Assigned)));
    assert!(!perms.has_permission(Resource::Quotes, Action::Read, Some(Context::Team)));
}

#[test]
fn test_grant_at_all_satisfies_every_narrower_scope() {
    let perms = UserPermissions::derive(Some(&session_for(Role::FulfillmentCoordinator)));

    for context in Context::iter() {
        assert!(
            perms.has_permission(Resource::Orders, Action::UpdateTracking, Some(context)),
            "orders:update_tracking:{context}"
        );
    }
}

#[test]
fn test_grant_at_own_does_not_widen() {
    let perms = UserPermissions::derive(Some(&session_for(Role::Customer)));

    assert!(perms.has_permission(Resource::Orders, Action::Read, Some(Context::Own)));
    assert!(!perms.has_permission(Resource::Orders, Action::Read, Some(Context::Assigned)));
    assert!(!perms.has_permission(Resource::Orders, Action::Read, Some(Context::Team)));
    assert!(!perms.has_permission(Resource::Orders, Action::Read, Some(Context::All)));
    assert!(perms.has_permission(Resource::Orders, Action::Read, None));
}

#[test]
fn test_admin_passes_checks_absent_from_every_table() {
    let perms = UserPermissions::derive(Some(&session_for(Role::Admin)));

    // No role definition grants settings or user deletion
    assert!(perms.has_permission(Resource::Settings, Action::ConfirmPayment, Some(Context::Own)));
    assert!(perms.has_permission(Resource::Users, Action::Delete, None));
    assert!(perms.has_any_permission(&[PermissionCheck::new(Resource::Vendors, Action::Archive)]));
}

#[test]
fn test_non_admin_roles_never_manage_settings_or_users() {
    for role in ALL_ROLES.into_iter().filter(|role| *role != Role::Admin) {
        let perms = UserPermissions::derive(Some(&session_for(role)));
        assert!(!perms.has_permission(Resource::Settings, Action::Manage, None), "{role}");
        assert!(!perms.has_permission(Resource::Users, Action::Delete, None), "{role}");
    }
}

#[test]
fn test_unauthenticated_fails_closed_for_every_triple() {
    let perms = UserPermissions::derive(None);

    for resource in Resource::iter() {
        for action in Action::iter() {
            assert!(!perms.has_permission(resource, action, None));
            for context in Context::iter() {
                assert!(!perms.has_permission(resource, action, Some(context)));
            }
        }
    }
    assert!(!perms.has_minimum_role(RoleLevel::CUSTOMER));
}

#[test]
fn test_invalid_role_level_has_empty_permission_set() {
    let perms = UserPermissions::derive(Some(&session_at(-1)));

    assert!(perms.permissions.is_empty());
    assert!(!perms.has_permission(Resource::Products, Action::Read, None));
    assert!(!perms.has_any_permission(&[
        PermissionCheck::new(Resource::Quotes, Action::Read),
        PermissionCheck::new(Resource::Orders, Action::Read),
    ]));
}

#[test]
fn test_batch_checks_on_empty_input() {
    for perms in [
        UserPermissions::derive(None),
        UserPermissions::derive(Some(&session_for(Role::SalesRep))),
        UserPermissions::derive(Some(&session_for(Role::Admin))),
    ] {
        assert!(!perms.has_any_permission(&[]));
        assert!(perms.has_all_permissions(&[]));
    }
}

#[test]
fn test_permission_strings_from_builder_resolve() {
    let perms = UserPermissions::derive(Some(&session_for(Role::SalesManager)));

    let approve = build_permission(Resource::Quotes, Action::Approve, Some(Context::Team));
    assert_eq!(approve, "quotes:approve:team");
    assert!(perms.has_permission_str(&approve));
    assert!(!perms.has_permission_str(&build_permission(
        Resource::Quotes,
        Action::Approve,
        Some(Context::All)
    )));
}

#[test]
fn test_user_permissions_carry_session_metadata() {
    let customer_id = Uuid::new_v4();
    let rep_id = Uuid::new_v4();
    let session = AuthSession::new(Uuid::new_v4(), RoleLevel::CUSTOMER)
        .with_customer(customer_id)
        .with_primary_sales_rep(rep_id)
        .with_territory("pacific");

    let perms = UserPermissions::derive(Some(&session));
    assert_eq!(perms.user_id, Some(session.user_id));
    assert_eq!(perms.role_names, vec!["customer".to_string()]);
    assert_eq!(perms.customer_id, Some(customer_id));
    assert_eq!(perms.primary_sales_rep_id, Some(rep_id));
    assert_eq!(perms.territory.as_deref(), Some("pacific"));
}

// ==================== Capability Hook Tests ====================

#[test]
fn test_customer_capability_scenarios() {
    let customer = store_for(Role::Customer).customer_capabilities();
    assert!(!customer.can_view_internal_fields);
    assert!(!customer.can_delete);

    let manager = store_for(Role::SalesManager).customer_capabilities();
    assert!(manager.can_assign_sales_rep);
    assert!(!manager.can_delete);

    let admin = store_for(Role::Admin).customer_capabilities();
    assert!(admin.can_delete);
}

#[test]
fn test_logout_drops_admin_capabilities_immediately() {
    let store = store_for(Role::Admin);
    let before = store.customer_capabilities();
    assert!(before.can_delete);
    assert!(before.can_view_internal_fields);

    store.sign_out();

    let after = store.customer_capabilities();
    assert!(!after.can_delete);
    assert!(!after.can_view_internal_fields);
    assert_eq!(after.user_role, Role::Customer);
}

#[test]
fn test_role_change_is_reflected_on_next_derivation() {
    let store = store_for(Role::SalesRep);
    assert!(!store.quote_capabilities().can_approve);

    store.set_role(Some(RoleLevel::SALES_MANAGER));
    assert!(store.quote_capabilities().can_approve);

    store.set_role(None);
    assert_eq!(
        store.customer_capabilities(),
        CustomerCapabilities::derive(&UserPermissions::anonymous())
    );
}

#[test]
fn test_capabilities_are_monotone_in_hierarchy_flags() {
    let flags: Vec<CustomerCapabilities> = ALL_ROLES
        .iter()
        .map(|role| store_for(*role).customer_capabilities())
        .collect();

    for pair in flags.windows(2) {
        assert!(pair[1].is_sales_rep_or_above >= pair[0].is_sales_rep_or_above);
        assert!(pair[1].is_sales_manager_or_above >= pair[0].is_sales_manager_or_above);
        assert!(pair[1].is_admin >= pair[0].is_admin);
    }
}

// ==================== Concurrency Tests ====================

#[test]
fn test_ten_concurrent_derivations_agree() {
    let store = store_for(Role::SalesManager);

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = store.clone();
                scope.spawn(move || (store.permissions(), store.capabilities()))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("derivation thread panicked"))
            .collect()
    });

    let (first_perms, first_caps) = &results[0];
    for (perms, caps) in &results {
        assert_eq!(perms, first_perms);
        assert_eq!(caps, first_caps);
    }
    assert!(first_caps.customers.can_assign_sales_rep);
}

#[test]
fn test_snapshot_isolated_from_later_changes() {
    let store = SessionStore::with_session(session_for(Role::Admin));
    let perms = store.permissions();

    store.sign_out();

    // Already-derived permissions are a value, not a live view
    assert!(perms.is_admin());
    assert!(!store.permissions().is_admin());
}
