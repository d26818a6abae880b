//! MedSupply Access Library
//!
//! Role-based access control for the medical-supply marketplace back-office:
//! role hierarchy, permission grammar, resolution engine, capability hooks and
//! declarative guards, plus the configuration and logging setup shared by the
//! tooling built on it.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod errors;

pub use auth::{
    build_permission, has_minimum_role, Action, AuthSession, Capabilities, Context,
    CustomerCapabilities, Decision, Guard, OrderCapabilities, OwnershipFacts, Permission, PermissionCheck,
    PermissionGuard, QuoteCapabilities, Resource, Role, RoleGuard, RoleLevel, SessionStore,
    UserPermissions,
};
pub use errors::{ApiFailure, FailureDisposition, PermissionParseError};
