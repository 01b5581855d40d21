pub mod check;
pub mod config;
pub mod init;
pub mod permissions;
pub mod roles;
pub mod routes;
pub mod serve;
pub mod token;

use std::sync::Arc;

use triage_auth::{PermissionResolver, Session, SessionUser};

/// Resolver for a stand-in user holding `role`, used by offline commands.
pub fn offline_resolver(role: &str) -> PermissionResolver {
    let session = Arc::new(Session::authenticated(SessionUser {
        user_id: "offline".to_string(),
        username: "offline".to_string(),
        email: None,
        role_code: Some(role.to_string()),
    }));
    let resolver = PermissionResolver::new(session);
    resolver.refresh();
    resolver
}
