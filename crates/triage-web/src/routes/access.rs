use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use triage_auth::error::AuthError;
use triage_auth::{
    AuthUser, GuardDecision, Permission, RequireMode, RouteGuard, app_routes, parse_permissions,
    route_guard,
};

use crate::models::{CheckRequest, CheckResponse, MeResponse, NavigateRequest, RouteResponse};
use crate::state::AppState;

pub async fn me(auth_user: AuthUser) -> Json<MeResponse> {
    let resolver = &auth_user.resolver;
    Json(MeResponse {
        user_id: auth_user.user.user_id.clone(),
        username: auth_user.user.username.clone(),
        email: auth_user.user.email.clone(),
        role: resolver.user_role(),
        role_name: resolver.role_descriptor().map(|r| r.display_name),
        permissions: resolver.permissions().into_iter().collect(),
    })
}

pub async fn check(
    auth_user: AuthUser,
    Json(req): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, AuthError> {
    let required = parse_permissions(&req.permissions)?;
    let resolver = &auth_user.resolver;

    let allowed = match req.mode {
        RequireMode::All => resolver.has_all_permissions(&required),
        RequireMode::Any => resolver.has_any_permission(&required),
    };
    let missing: Vec<Permission> = required
        .into_iter()
        .filter(|p| !resolver.has_permission(*p))
        .collect();

    Ok(Json(CheckResponse { allowed, missing }))
}

pub async fn navigate(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<GuardDecision>, AuthError> {
    let guard: RouteGuard = route_guard(&req.path)
        .ok_or_else(|| AuthError::InvalidInput(format!("unknown route: {}", req.path)))?;
    Ok(Json(guard.evaluate(&auth_user.resolver, &state.guard)))
}

pub async fn routes(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<RouteResponse>> {
    Json(
        app_routes()
            .into_iter()
            .map(|r| {
                let decision = r.guard.evaluate(&auth_user.resolver, &state.guard);
                RouteResponse {
                    path: r.path,
                    title: r.title,
                    allowed: decision.is_allowed(),
                    notice: match decision {
                        GuardDecision::Allow => None,
                        GuardDecision::Deny(d) => Some(d.notice),
                    },
                }
            })
            .collect(),
    )
}
