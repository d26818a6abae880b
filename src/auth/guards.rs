/*!
 * # Guards
 *
 * Declarative wrappers deciding whether guarded content is rendered.
 *
 * A guard holds only its requirement and an optional fallback. Each call
 * resolves against the permissions passed in, so a session change is seen
 * on the next render. Content is built lazily: when a guard denies, the
 * closure producing its children is never called, and nothing nested
 * inside it is evaluated.
 */

use crate::auth::permissions::{Action, Context, Resource};
use crate::auth::rbac::UserPermissions;
use crate::auth::roles::RoleLevel;

/// Outcome of resolving a guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<F> {
    Allowed,
    Denied(Option<F>),
}

impl<F> Decision<F> {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Requirement shared by all guards
pub trait Guard {
    type Fallback;

    /// Returns whether the guarded content may be rendered
    fn permits(&self, perms: &UserPermissions) -> bool;

    fn fallback(&self) -> Option<&Self::Fallback>;

    fn resolve(&self, perms: &UserPermissions) -> Decision<&Self::Fallback> {
        if self.permits(perms) {
            Decision::Allowed
        } else {
            Decision::Denied(self.fallback())
        }
    }

    /// Build the children when permitted, otherwise a copy of the fallback.
    /// `None` means nothing is rendered.
    fn render<C>(&self, perms: &UserPermissions, children: C) -> Option<Self::Fallback>
    where
        C: FnOnce() -> Self::Fallback,
        Self::Fallback: Clone,
    {
        match self.resolve(perms) {
            Decision::Allowed => Some(children()),
            Decision::Denied(fallback) => fallback.cloned(),
        }
    }
}

/// Renders its children only for sessions at or above a minimum role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGuard<F> {
    pub minimum_role: RoleLevel,
    pub fallback: Option<F>,
}

impl<F> RoleGuard<F> {
    pub fn new(minimum_role: impl Into<RoleLevel>) -> Self {
        Self {
            minimum_role: minimum_role.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: F) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl<F> Guard for RoleGuard<F> {
    type Fallback = F;

    fn permits(&self, perms: &UserPermissions) -> bool {
        perms.has_minimum_role(self.minimum_role)
    }

    fn fallback(&self) -> Option<&F> {
        self.fallback.as_ref()
    }
}

/// Renders its children only when a permission check passes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGuard<F> {
    pub resource: Resource,
    pub action: Action,
    pub context: Option<Context>,
    pub fallback: Option<F>,
}

impl<F> PermissionGuard<F> {
    pub fn new(resource: Resource, action: Action) -> Self {
        Self {
            resource,
            action,
            context: None,
            fallback: None,
        }
    }

    pub fn in_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_fallback(mut self, fallback: F) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl<F> Guard for PermissionGuard<F> {
    type Fallback = F;

    fn permits(&self, perms: &UserPermissions) -> bool {
        perms.has_permission(self.resource, self.action, self.context)
    }

    fn fallback(&self) -> Option<&F> {
        self.fallback.as_ref()
    }
}
