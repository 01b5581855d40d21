use serde::{Deserialize, Serialize};
use triage_core::config::AccessSettings;

use crate::permissions::Permission;
use crate::resolver::PermissionResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequireMode {
    #[default]
    All,
    Any,
}

/// Where denied navigations are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    pub default_route: String,
    pub login_route: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self::from(&AccessSettings::default())
    }
}

impl From<&AccessSettings> for GuardConfig {
    fn from(settings: &AccessSettings) -> Self {
        Self {
            default_route: settings.default_route.clone(),
            login_route: settings.login_route.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Denial {
    pub redirect_to: String,
    pub notice: String,
    pub missing: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum GuardDecision {
    Allow,
    Deny(Denial),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Permission requirement attached to a navigable route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteGuard {
    pub required: Vec<Permission>,
    #[serde(default)]
    pub mode: RequireMode,
}

impl RouteGuard {
    pub fn all(required: impl Into<Vec<Permission>>) -> Self {
        Self {
            required: required.into(),
            mode: RequireMode::All,
        }
    }

    pub fn any(required: impl Into<Vec<Permission>>) -> Self {
        Self {
            required: required.into(),
            mode: RequireMode::Any,
        }
    }

    /// Boolean form of the guard.
    pub fn allows(&self, resolver: &PermissionResolver) -> bool {
        match self.mode {
            RequireMode::All => resolver.has_all_permissions(&self.required),
            RequireMode::Any => resolver.has_any_permission(&self.required),
        }
    }

    pub fn evaluate(&self, resolver: &PermissionResolver, config: &GuardConfig) -> GuardDecision {
        if !resolver.is_authenticated() {
            return GuardDecision::Deny(Denial {
                redirect_to: config.login_route.clone(),
                notice: "Sign in to continue".to_string(),
                missing: self.required.clone(),
            });
        }

        if self.allows(resolver) {
            return GuardDecision::Allow;
        }

        let missing: Vec<Permission> = self
            .required
            .iter()
            .copied()
            .filter(|p| !resolver.has_permission(*p))
            .collect();
        let names: Vec<&str> = self.required.iter().map(|p| p.as_str()).collect();
        let notice = match self.mode {
            RequireMode::All => format!("Access denied: requires {}", names.join(", ")),
            RequireMode::Any => format!("Access denied: requires one of {}", names.join(", ")),
        };
        tracing::info!(role = ?resolver.user_role(), %notice, "navigation denied");

        GuardDecision::Deny(Denial {
            redirect_to: config.default_route.clone(),
            notice,
            missing,
        })
    }
}

/// Decides whether a UI fragment is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateQuery {
    Single(Permission),
    Any(Vec<Permission>),
    All(Vec<Permission>),
}

impl GateQuery {
    pub fn should_render(&self, resolver: &PermissionResolver) -> bool {
        match self {
            GateQuery::Single(p) => resolver.has_permission(*p),
            GateQuery::Any(list) => resolver.has_any_permission(list),
            GateQuery::All(list) => resolver.has_all_permissions(list),
        }
    }
}

impl From<Permission> for GateQuery {
    fn from(p: Permission) -> Self {
        GateQuery::Single(p)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavRoute {
    pub path: &'static str,
    pub title: &'static str,
    pub guard: RouteGuard,
}

/// Navigable sections of the application and what each requires.
pub fn app_routes() -> Vec<NavRoute> {
    use Permission as P;

    let route = |path, title, guard| NavRoute { path, title, guard };
    vec![
        route(
            "/dashboard",
            "Dashboard",
            RouteGuard::any([P::DashboardAccess, P::DashboardFull]),
        ),
        route(
            "/projects",
            "Projects",
            RouteGuard::any([P::ProjectView, P::ProjectManage]),
        ),
        route(
            "/projects/new",
            "New project",
            RouteGuard::any([P::ProjectCreate, P::ProjectManage]),
        ),
        route(
            "/incidents",
            "Incidents",
            RouteGuard::any([P::IncidentView, P::IncidentFull]),
        ),
        route(
            "/incidents/new",
            "Report incident",
            RouteGuard::any([P::IncidentCreate, P::IncidentFull]),
        ),
        route("/sprints", "Sprints", RouteGuard::all([P::SprintView])),
        route("/audit", "Audit log", RouteGuard::all([P::AuditView])),
        route("/backups", "Backups", RouteGuard::all([P::BackupView])),
        route("/users", "Users", RouteGuard::any([P::UserView, P::UserManage])),
        route("/admin", "Administration", RouteGuard::all([P::AdminAccess])),
    ]
}

/// Exact path match against `app_routes`.
pub fn route_guard(path: &str) -> Option<RouteGuard> {
    app_routes()
        .into_iter()
        .find(|r| r.path == path)
        .map(|r| r.guard)
}

/// Routes the current session may navigate to, for menu construction.
pub fn visible_routes(resolver: &PermissionResolver) -> Vec<NavRoute> {
    app_routes()
        .into_iter()
        .filter(|r| r.guard.allows(resolver))
        .collect()
}
