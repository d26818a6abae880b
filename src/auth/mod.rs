/*!
 * # Authorization Module
 *
 * This module mirrors the backend's role-based access control on the
 * client side of the back-office. It provides:
 *
 * - The role hierarchy and minimum-role predicates
 * - The `resource:action[:context]` permission grammar
 * - The permission resolution engine over a session snapshot
 * - Capability hooks for customers, quotes and orders
 * - Role and permission guards for conditional rendering
 *
 * Decisions here are an optimistic UI hint. The backend remains the
 * authority and may still answer 403.
 */

pub mod capabilities;
pub mod guards;
pub mod permissions;
pub mod rbac;
pub mod roles;
pub mod session;

// Re-exports
pub use capabilities::*;
pub use guards::*;
pub use permissions::*;
pub use rbac::*;
pub use roles::*;
pub use session::*;
