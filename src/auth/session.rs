/*!
 * # Session Snapshot
 *
 * The auth store owns the signed-in session. Permission resolution only
 * ever reads a snapshot of it; nothing in this crate caches or mutates the
 * derived permissions.
 */

use crate::auth::roles::RoleLevel;
use crate::auth::UserPermissions;
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Authenticated session data as held by the auth store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user_id: Uuid,
    /// Anything that is not an integer deserializes to `None`.
    #[serde(default, deserialize_with = "lenient_role_level")]
    pub role: Option<RoleLevel>,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub customer_id: Option<Uuid>,
    #[serde(default)]
    pub territory: Option<String>,
    #[serde(default)]
    pub primary_sales_rep_id: Option<Uuid>,
}

impl AuthSession {
    /// Create an authenticated session for a user at the given role level
    pub fn new(user_id: Uuid, role: impl Into<RoleLevel>) -> Self {
        Self {
            user_id,
            role: Some(role.into()),
            is_authenticated: true,
            customer_id: None,
            territory: None,
            primary_sales_rep_id: None,
        }
    }

    pub fn with_customer(mut self, customer_id: Uuid) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn with_territory(mut self, territory: impl Into<String>) -> Self {
        self.territory = Some(territory.into());
        self
    }

    pub fn with_primary_sales_rep(mut self, sales_rep_id: Uuid) -> Self {
        self.primary_sales_rep_id = Some(sales_rep_id);
        self
    }

    /// Parse a session persisted by the storefront.
    ///
    /// Malformed payloads yield `None`, which resolves to least privilege.
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "discarding unreadable session payload");
                None
            }
        }
    }
}

fn lenient_role_level<'de, D>(deserializer: D) -> Result<Option<RoleLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_i64().map(RoleLevel))
}

/// Shared handle to the current session.
///
/// Cloning the store shares the same session; every read takes a fresh
/// snapshot.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl SessionStore {
    /// Create a store with nobody signed in
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: AuthSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(session))),
        }
    }

    pub fn snapshot(&self) -> Option<AuthSession> {
        self.inner.read().clone()
    }

    pub fn sign_in(&self, session: AuthSession) {
        debug!(user_id = %session.user_id, role = ?session.role, "session signed in");
        *self.inner.write() = Some(session);
    }

    pub fn sign_out(&self) {
        if let Some(previous) = self.inner.write().take() {
            debug!(user_id = %previous.user_id, "session signed out");
        }
    }

    /// Replace the role of the signed-in user. No-op when signed out.
    pub fn set_role(&self, role: Option<RoleLevel>) {
        if let Some(session) = self.inner.write().as_mut() {
            debug!(user_id = %session.user_id, from = ?session.role, to = ?role, "session role changed");
            session.role = role;
        }
    }

    /// Derive permissions from the current snapshot.
    pub fn permissions(&self) -> UserPermissions {
        UserPermissions::derive(self.snapshot().as_ref())
    }
}
