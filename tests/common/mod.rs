#![allow(dead_code)]

use medsupply_access::{AuthSession, Role, RoleLevel, SessionStore};
use uuid::Uuid;

/// All named roles, lowest rank first
pub const ALL_ROLES: [Role; 5] = [
    Role::Customer,
    Role::SalesRep,
    Role::SalesManager,
    Role::FulfillmentCoordinator,
    Role::Admin,
];

pub fn session_for(role: Role) -> AuthSession {
    AuthSession::new(Uuid::new_v4(), role)
}

pub fn session_at(level: i64) -> AuthSession {
    AuthSession::new(Uuid::new_v4(), RoleLevel(level))
}

pub fn store_for(role: Role) -> SessionStore {
    SessionStore::with_session(session_for(role))
}

/// Minimal markup tree standing in for rendered back-office output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(&'static str, Vec<Node>),
}

impl Node {
    pub fn text(value: &str) -> Self {
        Node::Text(value.to_string())
    }

    pub fn div(children: Vec<Node>) -> Self {
        Node::Element("div", children)
    }

    pub fn serialize(&self) -> String {
        match self {
            Node::Text(value) => value.clone(),
            Node::Element(tag, children) => {
                let inner: String = children.iter().map(Node::serialize).collect();
                format!("<{tag}>{inner}</{tag}>")
            }
        }
    }
}

/// Serialize optional guard output the way a page would render it
pub fn render_page(children: Vec<Option<Node>>) -> String {
    Node::div(children.into_iter().flatten().collect()).serialize()
}
