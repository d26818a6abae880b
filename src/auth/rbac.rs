/*!
 * # Role-Based Access Control (RBAC) Module
 *
 * This module defines which permissions each role is granted and resolves
 * permission checks for a session.
 *
 * Resolution rules:
 *
 * - Admin satisfies every check without consulting any table.
 * - An unscoped check passes when the role holds the resource/action at any scope.
 * - A scoped check passes only for a grant at an equal or broader scope
 *   (`own < assigned < team < all`).
 * - No session, an unauthenticated session, or a role level that names no
 *   role resolves to an empty permission set.
 */

use crate::auth::permissions::{Action, Context, Permission, Resource};
use crate::auth::roles::{self, Role, RoleLevel};
use crate::auth::session::AuthSession;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use strum::IntoEnumIterator;
use tracing::trace;
use uuid::Uuid;

/// Role definition with associated permissions
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub description: String,
    pub permissions: Vec<Permission>,
}

fn scoped(resource: Resource, action: Action, context: Context) -> Permission {
    Permission::scoped(resource, action, context)
}

fn unscoped(resource: Resource, action: Action) -> Permission {
    Permission::new(resource, action)
}

// Define standard roles and their permissions
lazy_static! {
    static ref ROLE_DEFINITIONS: HashMap<Role, RoleDefinition> = {
        use Action::*;
        use Context::*;
        use Resource::*;

        let mut roles = HashMap::new();

        roles.insert(
            Role::Customer,
            RoleDefinition {
                role: Role::Customer,
                description: "Storefront buyer managing their own account".to_string(),
                permissions: vec![
                    scoped(Quotes, Read, Own),
                    scoped(Quotes, Create, Own),
                    scoped(Quotes, Update, Own),
                    scoped(Orders, Read, Own),
                    scoped(Orders, Create, Own),
                    unscoped(Products, Read),
                    scoped(Customers, Read, Own),
                    scoped(Customers, Update, Own),
                    scoped(Providers, Read, Own),
                    scoped(Providers, Create, Own),
                    scoped(Providers, Update, Own),
                ],
            },
        );

        roles.insert(
            Role::SalesRep,
            RoleDefinition {
                role: Role::SalesRep,
                description: "Sales rep working the accounts assigned to them".to_string(),
                permissions: vec![
                    scoped(Quotes, Read, Assigned),
                    scoped(Quotes, Create, Assigned),
                    scoped(Quotes, Update, Assigned),
                    scoped(Quotes, Export, Assigned),
                    scoped(Orders, Read, Assigned),
                    scoped(Orders, Create, Assigned),
                    unscoped(Products, Read),
                    unscoped(Customers, Create),
                    scoped(Customers, Read, Assigned),
                    scoped(Customers, Update, Assigned),
                    scoped(Providers, Read, Assigned),
                    scoped(Providers, Create, Assigned),
                    scoped(Providers, Update, Assigned),
                    unscoped(Vendors, Read),
                    scoped(Analytics, Read, Own),
                ],
            },
        );

        roles.insert(
            Role::SalesManager,
            RoleDefinition {
                role: Role::SalesManager,
                description: "Sales manager overseeing a territory team".to_string(),
                permissions: vec![
                    scoped(Quotes, Read, Team),
                    scoped(Quotes, Create, Team),
                    scoped(Quotes, Update, Team),
                    scoped(Quotes, Approve, Team),
                    scoped(Quotes, Assign, Team),
                    scoped(Quotes, Export, Team),
                    scoped(Orders, Read, Team),
                    scoped(Orders, Create, Team),
                    scoped(Orders, Update, Team),
                    scoped(Orders, Export, Team),
                    unscoped(Products, Read),
                    unscoped(Customers, Create),
                    scoped(Customers, Read, All),
                    scoped(Customers, Update, All),
                    scoped(Customers, Assign, All),
                    scoped(Customers, Manage, All),
                    scoped(Customers, Export, All),
                    scoped(Providers, Read, All),
                    scoped(Providers, Create, All),
                    scoped(Providers, Update, All),
                    unscoped(Vendors, Read),
                    scoped(Analytics, Read, Team),
                    scoped(Analytics, Export, Team),
                    scoped(Users, Read, Team),
                ],
            },
        );

        roles.insert(
            Role::FulfillmentCoordinator,
            RoleDefinition {
                role: Role::FulfillmentCoordinator,
                description: "Fulfillment coordinator handling payment, shipping and catalog"
                    .to_string(),
                permissions: vec![
                    scoped(Quotes, Read, All),
                    scoped(Orders, Read, All),
                    scoped(Orders, Update, All),
                    scoped(Orders, ConfirmPayment, All),
                    scoped(Orders, UpdateTracking, All),
                    scoped(Orders, Archive, All),
                    scoped(Orders, Export, All),
                    unscoped(Products, Read),
                    unscoped(Products, Create),
                    unscoped(Products, Update),
                    unscoped(Products, Manage),
                    unscoped(Vendors, Read),
                    unscoped(Vendors, Create),
                    unscoped(Vendors, Update),
                    unscoped(Vendors, Manage),
                    scoped(Customers, Read, All),
                    scoped(Providers, Read, All),
                ],
            },
        );

        // Admin never consults this list; it is listed for inspection only
        roles.insert(
            Role::Admin,
            RoleDefinition {
                role: Role::Admin,
                description: "Administrator with full access".to_string(),
                permissions: Resource::iter()
                    .flat_map(|resource| Action::iter().map(move |action| unscoped(resource, action)))
                    .collect(),
            },
        );

        roles
    };
}

/// Get the static definition of a role
pub fn role_definition(role: Role) -> Option<&'static RoleDefinition> {
    ROLE_DEFINITIONS.get(&role)
}

/// All role definitions, lowest rank first
pub fn role_definitions() -> Vec<&'static RoleDefinition> {
    let mut definitions: Vec<&'static RoleDefinition> = ROLE_DEFINITIONS.values().collect();
    definitions.sort_by_key(|definition| definition.role);
    definitions
}

/// Resolve the named role for a raw level.
///
/// Any level at or above the admin sentinel is Admin; other levels must
/// match a named rank exactly.
pub fn resolve_role(level: Option<RoleLevel>) -> Option<Role> {
    if roles::is_admin(level) {
        return Some(Role::Admin);
    }
    level.and_then(Role::from_level)
}

/// One entry of a batch permission check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionCheck {
    pub resource: Resource,
    pub action: Action,
    #[serde(default)]
    pub context: Option<Context>,
}

impl PermissionCheck {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self {
            resource,
            action,
            context: None,
        }
    }

    pub const fn scoped(resource: Resource, action: Action, context: Context) -> Self {
        Self {
            resource,
            action,
            context: Some(context),
        }
    }
}

/// Ownership facts about a record, as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipFacts {
    /// Customer account that owns the record
    pub customer_id: Option<Uuid>,
    /// Sales rep the record is assigned to
    pub assigned_sales_rep_id: Option<Uuid>,
    pub territory: Option<String>,
}

impl OwnershipFacts {
    pub fn owned_by(customer_id: Uuid) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Self::default()
        }
    }

    pub fn assigned_to(mut self, sales_rep_id: Uuid) -> Self {
        self.assigned_sales_rep_id = Some(sales_rep_id);
        self
    }

    pub fn in_territory(mut self, territory: impl Into<String>) -> Self {
        self.territory = Some(territory.into());
        self
    }
}

/// Permissions derived from one session snapshot.
///
/// Never stored: derive a new value whenever the session may have changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPermissions {
    pub user_id: Option<Uuid>,
    pub role_names: Vec<String>,
    pub role_level: Option<RoleLevel>,
    pub permissions: BTreeSet<Permission>,
    pub customer_id: Option<Uuid>,
    pub territory: Option<String>,
    pub primary_sales_rep_id: Option<Uuid>,
}

impl UserPermissions {
    /// Least privilege: no role, no permissions.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            role_names: Vec::new(),
            role_level: None,
            permissions: BTreeSet::new(),
            customer_id: None,
            territory: None,
            primary_sales_rep_id: None,
        }
    }

    pub fn derive(session: Option<&AuthSession>) -> Self {
        let Some(session) = session.filter(|session| session.is_authenticated) else {
            return Self::anonymous();
        };

        let role = resolve_role(session.role);
        let permissions: BTreeSet<Permission> = role
            .and_then(role_definition)
            .map(|definition| definition.permissions.iter().copied().collect())
            .unwrap_or_default();

        if role.is_none() {
            trace!(user_id = %session.user_id, level = ?session.role, "role level names no role");
        }

        Self {
            user_id: Some(session.user_id),
            role_names: role.map(|role| vec![role.to_string()]).unwrap_or_default(),
            role_level: session.role,
            permissions,
            customer_id: session.customer_id,
            territory: session.territory.clone(),
            primary_sales_rep_id: session.primary_sales_rep_id,
        }
    }

    /// Derive directly from a role, for tooling and tests.
    pub fn for_role(role: Role) -> Self {
        Self::derive(Some(&AuthSession::new(Uuid::nil(), role)))
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        resolve_role(self.role_level)
    }

    pub fn role_display_name(&self) -> &'static str {
        roles::role_display_name(self.role().map(Role::level))
    }

    pub fn has_minimum_role(&self, minimum_role: RoleLevel) -> bool {
        roles::has_minimum_role(self.role_level, minimum_role)
    }

    pub fn is_admin(&self) -> bool {
        roles::is_admin(self.role_level)
    }

    /// Check if the session may perform `action` on `resource` at `context`
    pub fn has_permission(
        &self,
        resource: Resource,
        action: Action,
        context: Option<Context>,
    ) -> bool {
        if self.is_admin() {
            return true;
        }

        let allowed = self
            .permissions
            .iter()
            .any(|granted| granted.grants(resource, action, context));

        if !allowed {
            trace!(
                user_id = ?self.user_id,
                level = ?self.role_level,
                %resource,
                %action,
                context = ?context,
                "permission denied"
            );
        }

        allowed
    }

    pub fn check(&self, check: &PermissionCheck) -> bool {
        self.has_permission(check.resource, check.action, check.context)
    }

    /// True if at least one check passes; false for an empty list
    pub fn has_any_permission(&self, checks: &[PermissionCheck]) -> bool {
        checks.iter().any(|check| self.check(check))
    }

    /// True only if every check passes; true for an empty list
    pub fn has_all_permissions(&self, checks: &[PermissionCheck]) -> bool {
        checks.iter().all(|check| self.check(check))
    }

    /// Check an untyped permission string. Malformed strings are denied,
    /// including for admins.
    pub fn has_permission_str(&self, permission: &str) -> bool {
        match permission.parse::<Permission>() {
            Ok(p) => self.has_permission(p.resource, p.action, p.context),
            Err(e) => {
                trace!(error = %e, "rejecting malformed permission check");
                false
            }
        }
    }

    /// Narrowest scope through which this user relates to a record.
    pub fn relationship_to(&self, facts: &OwnershipFacts) -> Context {
        if self.customer_id.is_some() && self.customer_id == facts.customer_id {
            return Context::Own;
        }
        if self.user_id.is_some() && self.user_id == facts.assigned_sales_rep_id {
            return Context::Assigned;
        }
        if self.territory.is_some() && self.territory == facts.territory {
            return Context::Team;
        }
        Context::All
    }

    /// Check a permission against a specific record
    pub fn can_act_on(&self, resource: Resource, action: Action, facts: &OwnershipFacts) -> bool {
        self.has_permission(resource, action, Some(self.relationship_to(facts)))
    }
}

impl Default for UserPermissions {
    fn default() -> Self {
        Self::anonymous()
    }
}
