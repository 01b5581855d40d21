pub mod access;
pub mod health;
pub mod permissions;
pub mod roles;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;
use triage_auth::AuthState;

use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let auth_state = AuthState {
        jwt_secret: state.jwt_secret.clone(),
    };

    // Bearer-authenticated routes
    let access = Router::new()
        .route("/api/access/me", get(access::me))
        .route("/api/access/check", post(access::check))
        .route("/api/access/navigate", post(access::navigate))
        .route("/api/access/routes", get(access::routes))
        .with_state(state);

    // Public routes
    let public = Router::new()
        .route("/api/health", get(health::get_health))
        .route("/api/access/roles", get(roles::list_roles))
        .route("/api/access/permissions", get(permissions::list_permissions));

    Router::new()
        .merge(public)
        .merge(access)
        .layer(Extension(auth_state))
        .layer(TraceLayer::new_for_http())
}
