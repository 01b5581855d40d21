use serde::{Deserialize, Serialize};
use triage_auth::{Permission, RequireMode};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
}

#[derive(Serialize)]
pub struct PermissionResponse {
    pub id: &'static str,
    pub description: &'static str,
}

#[derive(Serialize)]
pub struct RoleResponse {
    pub code: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub permissions: Vec<Permission>,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub user_id: String,
    pub username: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub role_name: Option<&'static str>,
    pub permissions: Vec<Permission>,
}

#[derive(Deserialize)]
pub struct CheckRequest {
    pub permissions: Vec<String>,
    #[serde(default)]
    pub mode: RequireMode,
}

#[derive(Serialize)]
pub struct CheckResponse {
    pub allowed: bool,
    pub missing: Vec<Permission>,
}

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub path: String,
}

#[derive(Serialize)]
pub struct RouteResponse {
    pub path: &'static str,
    pub title: &'static str,
    pub allowed: bool,
    pub notice: Option<String>,
}
