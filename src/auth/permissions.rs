/*!
 * # Permissions Module
 *
 * This module defines the permission grammar of the back-office.
 * A permission names a resource, an action and an optional context scope,
 * serialized as `resource:action` or `resource:action:context`.
 */

use crate::errors::PermissionParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// Protected resource types
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    Quotes,
    Orders,
    Products,
    Customers,
    Vendors,
    Analytics,
    Users,
    Settings,
    Providers,
}

/// Permission actions
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Approve,
    Assign,
    Export,
    Manage,
    ConfirmPayment,
    UpdateTracking,
    Archive,
}

/// Scope qualifier of a permission.
///
/// Variants are declared narrowest first, so the derived ordering is the
/// scope lattice: `Own < Assigned < Team < All`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Context {
    Own,
    Assigned,
    Team,
    All,
}

impl Context {
    /// A grant at this scope satisfies a request at `requested` when it is
    /// equal or broader.
    pub fn covers(self, requested: Context) -> bool {
        self >= requested
    }
}

/// One grantable capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
    pub context: Option<Context>,
}

impl Permission {
    /// Context-free permission (`resource:action`)
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self {
            resource,
            action,
            context: None,
        }
    }

    /// Scoped permission (`resource:action:context`)
    pub const fn scoped(resource: Resource, action: Action, context: Context) -> Self {
        Self {
            resource,
            action,
            context: Some(context),
        }
    }

    /// Returns whether holding this permission satisfies a request.
    ///
    /// An unscoped request is satisfied by any grant for the same
    /// resource and action. A scoped request needs a grant whose scope
    /// covers it; a context-free grant is unrestricted and covers every scope.
    pub fn grants(&self, resource: Resource, action: Action, requested: Option<Context>) -> bool {
        if self.resource != resource || self.action != action {
            return false;
        }

        match (self.context, requested) {
            (_, None) => true,
            (None, Some(_)) => true,
            (Some(granted), Some(requested)) => granted.covers(requested),
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.context {
            Some(context) => write!(f, "{}:{}:{}", self.resource, self.action, context),
            None => write!(f, "{}:{}", self.resource, self.action),
        }
    }
}

impl FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();

        let (resource, action, context) = match parts.as_slice() {
            [resource, action] => (*resource, *action, None),
            [resource, action, context] => (*resource, *action, Some(*context)),
            _ => return Err(PermissionParseError::Malformed(s.to_string())),
        };

        let resource = Resource::from_str(resource)
            .map_err(|_| PermissionParseError::UnknownResource(resource.to_string()))?;
        let action = Action::from_str(action)
            .map_err(|_| PermissionParseError::UnknownAction(action.to_string()))?;
        let context = context
            .map(|c| {
                Context::from_str(c).map_err(|_| PermissionParseError::UnknownContext(c.to_string()))
            })
            .transpose()?;

        Ok(Permission {
            resource,
            action,
            context,
        })
    }
}

impl Serialize for Permission {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Format a permission string
pub fn build_permission(resource: Resource, action: Action, context: Option<Context>) -> String {
    Permission {
        resource,
        action,
        context,
    }
    .to_string()
}
