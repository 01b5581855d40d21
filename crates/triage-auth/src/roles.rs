use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::permissions::{Permission as P, PermissionSet};

const SCRUM_MASTER: &[P] = &[P::DashboardAccess, P::DashboardFull];

const PRODUCT_OWNER: &[P] = &[
    P::DashboardAccess,
    P::DashboardFull,
    P::ProjectView,
    P::SprintView,
    P::SprintCreate,
    P::SprintUpdate,
];

const STAKEHOLDER: &[P] = &[P::DashboardAccess, P::IncidentView];

const LIDER_TECNICO: &[P] = &[
    P::DashboardAccess,
    P::DashboardFull,
    P::ProjectView,
    P::SprintView,
    P::SprintCreate,
    P::SprintUpdate,
];

const DESARROLLADOR: &[P] = &[
    P::DashboardAccess,
    P::ProjectView,
    P::IncidentView,
    P::IncidentCreate,
    P::IncidentLabelUpdate,
    P::IncidentDataUpdate,
    P::IncidentStatusUpdate,
    P::IncidentComment,
    P::IncidentAttachment,
    P::SprintView,
];

const QA_TESTER: &[P] = &[
    P::DashboardAccess,
    P::ProjectView,
    P::IncidentView,
    P::IncidentCreate,
    P::IncidentTitleUpdate,
    P::IncidentDescriptionUpdate,
    P::IncidentLabelUpdate,
    P::IncidentDataUpdate,
    P::IncidentStatusUpdate,
    P::IncidentAssign,
    P::IncidentComment,
    P::IncidentAttachment,
    P::SprintView,
];

/// A named role and the permissions it grants.
#[derive(Debug, Clone, Serialize)]
pub struct RoleDescriptor {
    pub code: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub permissions: PermissionSet,
}

impl RoleDescriptor {
    fn new(
        code: &'static str,
        display_name: &'static str,
        description: &'static str,
        permissions: impl IntoIterator<Item = P>,
    ) -> Self {
        Self {
            code,
            display_name,
            description,
            permissions: permissions.into_iter().collect(),
        }
    }

    pub fn grants(&self, permission: P) -> bool {
        self.permissions.contains(&permission)
    }
}

/// Role entry as listed by the backend. Display metadata only.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendRole {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDisplay {
    pub code: String,
    pub display_name: String,
    pub description: String,
}

/// Immutable role code to role descriptor mapping.
#[derive(Debug)]
pub struct RoleRegistry {
    roles: Vec<RoleDescriptor>,
}

static BUILTIN: LazyLock<Arc<RoleRegistry>> = LazyLock::new(|| {
    let incident_full = || P::family("incident-");
    let sprint_full = || P::family("sprint-");

    Arc::new(RoleRegistry::from_roles(vec![
        RoleDescriptor::new(
            "admin",
            "Administrador",
            "Unrestricted access to every area",
            P::ALL,
        ),
        RoleDescriptor::new(
            "scrum_master",
            "Scrum Master",
            "Runs projects, sprints and incidents",
            SCRUM_MASTER
                .iter()
                .copied()
                .chain(P::family("project-"))
                .chain(incident_full())
                .chain(sprint_full()),
        ),
        RoleDescriptor::new(
            "product_owner",
            "Product Owner",
            "Owns the backlog and sprint planning",
            PRODUCT_OWNER.iter().copied().chain(incident_full()),
        ),
        RoleDescriptor::new(
            "stakeholder",
            "Stakeholder",
            "Read-only follow-up of incidents",
            STAKEHOLDER.iter().copied(),
        ),
        RoleDescriptor::new(
            "lider_tecnico",
            "Líder Técnico",
            "Technical lead for incidents and sprints",
            LIDER_TECNICO.iter().copied().chain(incident_full()),
        ),
        RoleDescriptor::new(
            "desarrollador",
            "Desarrollador",
            "Works incidents without editing their title or description",
            DESARROLLADOR.iter().copied(),
        ),
        RoleDescriptor::new(
            "qa_tester",
            "QA Tester",
            "Reports, triages and assigns incidents",
            QA_TESTER.iter().copied(),
        ),
    ]))
});

impl RoleRegistry {
    pub fn from_roles(roles: Vec<RoleDescriptor>) -> Self {
        Self { roles }
    }

    /// The compiled-in registry, initialized once for the process lifetime.
    pub fn builtin() -> &'static RoleRegistry {
        &BUILTIN
    }

    /// Shared handle to the compiled-in registry.
    pub fn shared() -> Arc<RoleRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// Case-insensitive exact match on the role code.
    pub fn lookup(&self, code: &str) -> Option<&RoleDescriptor> {
        self.roles.iter().find(|r| r.code.eq_ignore_ascii_case(code))
    }

    /// Permissions granted to `code`. Unknown codes grant nothing.
    pub fn resolve(&self, code: &str) -> PermissionSet {
        self.lookup(code)
            .map(|r| r.permissions.clone())
            .unwrap_or_default()
    }

    pub fn roles(&self) -> impl Iterator<Item = &RoleDescriptor> {
        self.roles.iter()
    }

    /// Labels for the known roles, preferring backend-provided ones.
    /// Backend entries never change which permissions a role grants.
    pub fn display_catalog(&self, backend: &[BackendRole]) -> Vec<RoleDisplay> {
        for b in backend {
            if self.lookup(&b.code).is_none() {
                tracing::warn!(code = %b.code, "backend role not in registry, ignoring");
            }
        }

        self.roles
            .iter()
            .map(|r| {
                let remote = backend.iter().find(|b| b.code.eq_ignore_ascii_case(r.code));
                RoleDisplay {
                    code: r.code.to_string(),
                    display_name: remote
                        .and_then(|b| b.name.clone())
                        .unwrap_or_else(|| r.display_name.to_string()),
                    description: remote
                        .and_then(|b| b.description.clone())
                        .unwrap_or_else(|| r.description.to_string()),
                }
            })
            .collect()
    }
}
