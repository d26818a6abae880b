use crate::auth::permissions::{Action, Context, Resource};
use crate::auth::rbac::{OwnershipFacts, UserPermissions};
use serde::Serialize;

/// Capability flags for the order and fulfillment pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderCapabilities {
    pub can_view_all: bool,
    pub can_update_tracking: bool,
    pub can_confirm_payment: bool,
    pub can_archive: bool,
    pub can_export: bool,
}

impl OrderCapabilities {
    pub fn derive(perms: &UserPermissions) -> Self {
        Self {
            can_view_all: perms.has_permission(Resource::Orders, Action::Read, Some(Context::All)),
            can_update_tracking: perms.has_permission(Resource::Orders, Action::UpdateTracking, None),
            can_confirm_payment: perms.has_permission(Resource::Orders, Action::ConfirmPayment, None),
            can_archive: perms.has_permission(Resource::Orders, Action::Archive, None),
            can_export: perms.has_permission(Resource::Orders, Action::Export, None),
        }
    }
}

/// Access to one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderRecordAccess {
    pub can_view: bool,
    pub can_update: bool,
}

impl OrderRecordAccess {
    pub fn derive(perms: &UserPermissions, facts: &OwnershipFacts) -> Self {
        Self {
            can_view: perms.can_act_on(Resource::Orders, Action::Read, facts),
            can_update: perms.can_act_on(Resource::Orders, Action::Update, facts),
        }
    }
}
