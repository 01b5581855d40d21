use axum::Json;
use triage_auth::Permission;

use crate::models::PermissionResponse;

pub async fn list_permissions() -> Json<Vec<PermissionResponse>> {
    Json(
        Permission::ALL
            .into_iter()
            .map(|p| PermissionResponse {
                id: p.as_str(),
                description: p.description(),
            })
            .collect(),
    )
}
