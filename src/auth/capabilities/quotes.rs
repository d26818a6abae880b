use crate::auth::permissions::{Action, Context, Resource};
use crate::auth::rbac::{OwnershipFacts, PermissionCheck, UserPermissions};
use serde::Serialize;

/// Capability flags for the quote pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuoteCapabilities {
    pub can_create: bool,
    pub can_view_all: bool,
    pub can_approve: bool,
    /// Reassign a quote to another rep
    pub can_assign: bool,
    pub can_export: bool,
    pub can_convert_to_order: bool,
}

impl QuoteCapabilities {
    pub fn derive(perms: &UserPermissions) -> Self {
        Self {
            can_create: perms.has_permission(Resource::Quotes, Action::Create, None),
            can_view_all: perms.has_permission(Resource::Quotes, Action::Read, Some(Context::All)),
            can_approve: perms.has_permission(Resource::Quotes, Action::Approve, None),
            can_assign: perms.has_permission(Resource::Quotes, Action::Assign, None),
            can_export: perms.has_permission(Resource::Quotes, Action::Export, None),
            can_convert_to_order: perms.has_all_permissions(&[
                PermissionCheck::new(Resource::Quotes, Action::Update),
                PermissionCheck::new(Resource::Orders, Action::Create),
            ]),
        }
    }
}

/// Access to one quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuoteRecordAccess {
    pub can_view: bool,
    pub can_edit: bool,
    pub can_approve: bool,
}

impl QuoteRecordAccess {
    pub fn derive(perms: &UserPermissions, facts: &OwnershipFacts) -> Self {
        Self {
            can_view: perms.can_act_on(Resource::Quotes, Action::Read, facts),
            can_edit: perms.can_act_on(Resource::Quotes, Action::Update, facts),
            can_approve: perms.can_act_on(Resource::Quotes, Action::Approve, facts),
        }
    }
}
