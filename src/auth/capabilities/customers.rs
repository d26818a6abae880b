use crate::auth::permissions::{Action, Context, Resource};
use crate::auth::rbac::{OwnershipFacts, UserPermissions};
use crate::auth::roles::{self, Role};
use serde::Serialize;
use uuid::Uuid;

/// Capability flags for the customer pages.
///
/// Row-level visibility of customer records is enforced by the backend;
/// these flags only drive what the UI offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomerCapabilities {
    /// Resolved role, `Customer` when signed out or unrecognized
    pub user_role: Role,
    /// Credit terms, rep notes and assignment details
    pub can_view_internal_fields: bool,
    pub can_assign_sales_rep: bool,
    /// Activate, suspend or close an account
    pub can_change_status: bool,
    pub can_delete: bool,
    pub is_sales_rep_or_above: bool,
    pub is_sales_manager_or_above: bool,
    pub is_admin: bool,
}

impl CustomerCapabilities {
    pub fn derive(perms: &UserPermissions) -> Self {
        let level = perms.role_level;

        Self {
            user_role: perms.role().unwrap_or(Role::Customer),
            can_view_internal_fields: perms.has_permission(
                Resource::Customers,
                Action::Update,
                Some(Context::Assigned),
            ),
            can_assign_sales_rep: perms.has_permission(Resource::Customers, Action::Assign, None),
            can_change_status: perms.has_permission(Resource::Customers, Action::Manage, None),
            can_delete: perms.has_permission(Resource::Customers, Action::Delete, None),
            is_sales_rep_or_above: roles::is_sales_rep_or_above(level),
            is_sales_manager_or_above: roles::is_sales_manager_or_above(level),
            is_admin: roles::is_admin(level),
        }
    }
}

impl From<&UserPermissions> for CustomerCapabilities {
    fn from(perms: &UserPermissions) -> Self {
        Self::derive(perms)
    }
}

/// Access to one customer account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomerRecordAccess {
    pub can_view: bool,
    pub can_edit: bool,
}

impl CustomerRecordAccess {
    /// `primary_sales_rep_id` is the rep the account is assigned to.
    pub fn derive(
        perms: &UserPermissions,
        customer_id: Uuid,
        primary_sales_rep_id: Option<Uuid>,
        territory: Option<&str>,
    ) -> Self {
        let facts = OwnershipFacts {
            customer_id: Some(customer_id),
            assigned_sales_rep_id: primary_sales_rep_id,
            territory: territory.map(str::to_string),
        };

        Self {
            can_view: perms.can_act_on(Resource::Customers, Action::Read, &facts),
            can_edit: perms.can_act_on(Resource::Customers, Action::Update, &facts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::roles::RoleLevel;
    use crate::auth::session::AuthSession;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Customer, false, false, false, false)]
    #[case(Role::SalesRep, true, false, false, false)]
    #[case(Role::SalesManager, true, true, true, false)]
    #[case(Role::FulfillmentCoordinator, false, false, false, false)]
    #[case(Role::Admin, true, true, true, true)]
    fn test_customer_capability_matrix(
        #[case] role: Role,
        #[case] internal_fields: bool,
        #[case] assign_rep: bool,
        #[case] change_status: bool,
        #[case] delete: bool,
    ) {
        let caps = CustomerCapabilities::derive(&UserPermissions::for_role(role));
        assert_eq!(caps.user_role, role);
        assert_eq!(caps.can_view_internal_fields, internal_fields);
        assert_eq!(caps.can_assign_sales_rep, assign_rep);
        assert_eq!(caps.can_change_status, change_status);
        assert_eq!(caps.can_delete, delete);
    }

    #[rstest]
    #[case(Role::Customer, false, false, false)]
    #[case(Role::SalesRep, true, false, false)]
    #[case(Role::SalesManager, true, true, false)]
    #[case(Role::FulfillmentCoordinator, true, true, false)]
    #[case(Role::Admin, true, true, true)]
    fn test_customer_hierarchy_flags(
        #[case] role: Role,
        #[case] rep_or_above: bool,
        #[case] manager_or_above: bool,
        #[case] admin: bool,
    ) {
        let caps = CustomerCapabilities::derive(&UserPermissions::for_role(role));
        assert_eq!(caps.is_sales_rep_or_above, rep_or_above);
        assert_eq!(caps.is_sales_manager_or_above, manager_or_above);
        assert_eq!(caps.is_admin, admin);
    }

    #[test]
    fn test_signed_out_defaults_to_customer_row() {
        let caps = CustomerCapabilities::derive(&UserPermissions::anonymous());
        assert_eq!(caps, CustomerCapabilities::derive(&UserPermissions::for_role(Role::Customer)));
        assert_eq!(caps.user_role, Role::Customer);
    }

    #[test]
    fn test_record_access_follows_assignment() {
        let rep_id = Uuid::new_v4();
        let rep = UserPermissions::derive(Some(&AuthSession::new(rep_id, RoleLevel::SALES_REP)));

        let mine = CustomerRecordAccess::derive(&rep, Uuid::new_v4(), Some(rep_id), None);
        assert!(mine.can_view);
        assert!(mine.can_edit);

        let theirs = CustomerRecordAccess::derive(&rep, Uuid::new_v4(), Some(Uuid::new_v4()), None);
        assert!(!theirs.can_view);
        assert!(!theirs.can_edit);

        let customer_id = Uuid::new_v4();
        let customer = UserPermissions::derive(Some(
            &AuthSession::new(Uuid::new_v4(), RoleLevel::CUSTOMER).with_customer(customer_id),
        ));
        let own = CustomerRecordAccess::derive(&customer, customer_id, Some(rep_id), None);
        assert!(own.can_view);
        assert!(own.can_edit);
    }
}
