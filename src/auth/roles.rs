/*!
 * # Role Hierarchy
 *
 * Roles are ranked by an integer level. "Has at least role X" means the
 * user's level is greater than or equal to the level of X:
 *
 * Customer(0) < SalesRep(100) < SalesManager(200) < FulfillmentCoordinator(300) < Admin
 *
 * Admin is a sentinel that sits above every other level. An absent level
 * never compares, so every minimum-role check fails for it.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Integer rank of a role.
///
/// Comparisons are defined for any integer, not only the named levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleLevel(pub i64);

impl RoleLevel {
    pub const CUSTOMER: RoleLevel = RoleLevel(0);
    pub const SALES_REP: RoleLevel = RoleLevel(100);
    pub const SALES_MANAGER: RoleLevel = RoleLevel(200);
    pub const FULFILLMENT_COORDINATOR: RoleLevel = RoleLevel(300);
    pub const ADMIN: RoleLevel = RoleLevel(9_999_999);

    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for RoleLevel {
    fn from(value: i64) -> Self {
        RoleLevel(value)
    }
}

impl From<Role> for RoleLevel {
    fn from(role: Role) -> Self {
        role.level()
    }
}

impl fmt::Display for RoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named roles of the marketplace.
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
pub enum Role {
    Customer,
    SalesRep,
    SalesManager,
    FulfillmentCoordinator,
    Admin,
}

impl Role {
    pub const fn level(self) -> RoleLevel {
        match self {
            Role::Customer => RoleLevel::CUSTOMER,
            Role::SalesRep => RoleLevel::SALES_REP,
            Role::SalesManager => RoleLevel::SALES_MANAGER,
            Role::FulfillmentCoordinator => RoleLevel::FULFILLMENT_COORDINATOR,
            Role::Admin => RoleLevel::ADMIN,
        }
    }

    /// Exact lookup. Levels between or outside the named ranks have no role.
    pub fn from_level(level: RoleLevel) -> Option<Role> {
        Role::iter().find(|role| role.level() == level)
    }

    /// Human label shown in the back-office.
    pub const fn display_name(self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::SalesRep => "Sales Rep",
            Role::SalesManager => "Sales Manager",
            Role::FulfillmentCoordinator => "Fulfillment Coordinator",
            Role::Admin => "Admin",
        }
    }
}

/// Label used when a level has no named role.
pub const UNKNOWN_ROLE_NAME: &str = "Unknown";

/// Returns true when `user_level` is present and at least `minimum_role`.
pub fn has_minimum_role(user_level: Option<RoleLevel>, minimum_role: RoleLevel) -> bool {
    match user_level {
        Some(level) => level >= minimum_role,
        None => false,
    }
}

pub fn is_admin(user_level: Option<RoleLevel>) -> bool {
    has_minimum_role(user_level, RoleLevel::ADMIN)
}

pub fn is_fulfillment_coordinator_or_above(user_level: Option<RoleLevel>) -> bool {
    has_minimum_role(user_level, RoleLevel::FULFILLMENT_COORDINATOR)
}

pub fn is_sales_manager_or_above(user_level: Option<RoleLevel>) -> bool {
    has_minimum_role(user_level, RoleLevel::SALES_MANAGER)
}

pub fn is_sales_rep_or_above(user_level: Option<RoleLevel>) -> bool {
    has_minimum_role(user_level, RoleLevel::SALES_REP)
}

/// Equality, not a minimum: staff roles are not customers.
pub fn is_customer(user_level: Option<RoleLevel>) -> bool {
    user_level == Some(RoleLevel::CUSTOMER)
}

pub fn role_display_name(level: Option<RoleLevel>) -> &'static str {
    level
        .and_then(Role::from_level)
        .map(Role::display_name)
        .unwrap_or(UNKNOWN_ROLE_NAME)
}
