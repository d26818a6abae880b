/*!
 * # Capability Hooks
 *
 * Entity-specific capability flags consumed directly by back-office pages.
 * Every flag is derived through the permission engine; nothing here
 * compares role names.
 */

mod customers;
mod orders;
mod quotes;

pub use customers::*;
pub use orders::*;
pub use quotes::*;

use crate::auth::session::SessionStore;
use crate::auth::UserPermissions;
use serde::Serialize;

/// Every capability set for one session snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub customers: CustomerCapabilities,
    pub quotes: QuoteCapabilities,
    pub orders: OrderCapabilities,
}

impl Capabilities {
    pub fn derive(perms: &UserPermissions) -> Self {
        Self {
            customers: CustomerCapabilities::derive(perms),
            quotes: QuoteCapabilities::derive(perms),
            orders: OrderCapabilities::derive(perms),
        }
    }
}

impl SessionStore {
    pub fn customer_capabilities(&self) -> CustomerCapabilities {
        CustomerCapabilities::derive(&self.permissions())
    }

    pub fn quote_capabilities(&self) -> QuoteCapabilities {
        QuoteCapabilities::derive(&self.permissions())
    }

    pub fn order_capabilities(&self) -> OrderCapabilities {
        OrderCapabilities::derive(&self.permissions())
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::derive(&self.permissions())
    }
}
