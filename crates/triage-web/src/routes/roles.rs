use axum::Json;
use triage_auth::RoleRegistry;

use crate::models::RoleResponse;

pub async fn list_roles() -> Json<Vec<RoleResponse>> {
    Json(
        RoleRegistry::builtin()
            .roles()
            .map(|r| RoleResponse {
                code: r.code,
                display_name: r.display_name,
                description: r.description,
                permissions: r.permissions.iter().copied().collect(),
            })
            .collect(),
    )
}
