use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AuthError;

/// A fine-grained capability identifier. Equality is identifier equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
    DashboardAccess,
    DashboardFull,

    UserView,
    UserCreate,
    UserUpdate,
    UserDelete,
    UserManage,

    ProjectView,
    ProjectCreate,
    ProjectUpdate,
    ProjectDelete,
    ProjectManage,
    ProjectMemberAdd,
    ProjectMemberRemove,

    IncidentView,
    IncidentCreate,
    IncidentTitleUpdate,
    IncidentDescriptionUpdate,
    IncidentLabelUpdate,
    IncidentDataUpdate,
    IncidentStatusUpdate,
    IncidentAssign,
    IncidentClose,
    IncidentComment,
    IncidentAttachment,
    IncidentFull,

    SprintView,
    SprintCreate,
    SprintUpdate,
    SprintDelete,
    SprintClose,

    AuditView,
    AuditExport,

    BackupView,
    BackupCreate,
    BackupRestore,

    AdminAccess,
    AdminFull,
}

/// Working set of permissions derived from a role.
pub type PermissionSet = BTreeSet<Permission>;

static TABLE: &[(Permission, &str, &str)] = &[
    (Permission::DashboardAccess, "dashboard-access", "View the dashboard"),
    (Permission::DashboardFull, "dashboard-full", "View every dashboard metric"),
    (Permission::UserView, "user-view", "View user list"),
    (Permission::UserCreate, "user-create", "Create users"),
    (Permission::UserUpdate, "user-update", "Update users"),
    (Permission::UserDelete, "user-delete", "Delete users"),
    (Permission::UserManage, "user-manage", "Full user administration"),
    (Permission::ProjectView, "project-view", "View projects"),
    (Permission::ProjectCreate, "project-create", "Create projects"),
    (Permission::ProjectUpdate, "project-update", "Update projects"),
    (Permission::ProjectDelete, "project-delete", "Delete projects"),
    (Permission::ProjectManage, "project-manage", "Full project administration"),
    (Permission::ProjectMemberAdd, "project-member-add", "Add project members"),
    (Permission::ProjectMemberRemove, "project-member-remove", "Remove project members"),
    (Permission::IncidentView, "incident-view", "View incidents"),
    (Permission::IncidentCreate, "incident-create", "Report incidents"),
    (Permission::IncidentTitleUpdate, "incident-title-update", "Edit incident titles"),
    (
        Permission::IncidentDescriptionUpdate,
        "incident-description-update",
        "Edit incident descriptions",
    ),
    (Permission::IncidentLabelUpdate, "incident-label-update", "Edit incident labels"),
    (Permission::IncidentDataUpdate, "incident-data-update", "Edit incident data fields"),
    (Permission::IncidentStatusUpdate, "incident-status-update", "Change incident status"),
    (Permission::IncidentAssign, "incident-assign", "Assign incidents"),
    (Permission::IncidentClose, "incident-close", "Close incidents"),
    (Permission::IncidentComment, "incident-comment", "Comment on incidents"),
    (Permission::IncidentAttachment, "incident-attachment", "Attach files to incidents"),
    (Permission::IncidentFull, "incident-full", "Full incident administration"),
    (Permission::SprintView, "sprint-view", "View sprints"),
    (Permission::SprintCreate, "sprint-create", "Create sprints"),
    (Permission::SprintUpdate, "sprint-update", "Update sprints"),
    (Permission::SprintDelete, "sprint-delete", "Delete sprints"),
    (Permission::SprintClose, "sprint-close", "Close sprints"),
    (Permission::AuditView, "audit-view", "View audit logs"),
    (Permission::AuditExport, "audit-export", "Export audit logs"),
    (Permission::BackupView, "backup-view", "View backups"),
    (Permission::BackupCreate, "backup-create", "Create backups"),
    (Permission::BackupRestore, "backup-restore", "Restore backups"),
    (Permission::AdminAccess, "admin-access", "Open the administration area"),
    (Permission::AdminFull, "admin-full", "Unrestricted administration"),
];

impl Permission {
    /// Every permission, in vocabulary order.
    pub const ALL: [Permission; 38] = [
        Permission::DashboardAccess,
        Permission::DashboardFull,
        Permission::UserView,
        Permission::UserCreate,
        Permission::UserUpdate,
        Permission::UserDelete,
        Permission::UserManage,
        Permission::ProjectView,
        Permission::ProjectCreate,
        Permission::ProjectUpdate,
        Permission::ProjectDelete,
        Permission::ProjectManage,
        Permission::ProjectMemberAdd,
        Permission::ProjectMemberRemove,
        Permission::IncidentView,
        Permission::IncidentCreate,
        Permission::IncidentTitleUpdate,
        Permission::IncidentDescriptionUpdate,
        Permission::IncidentLabelUpdate,
        Permission::IncidentDataUpdate,
        Permission::IncidentStatusUpdate,
        Permission::IncidentAssign,
        Permission::IncidentClose,
        Permission::IncidentComment,
        Permission::IncidentAttachment,
        Permission::IncidentFull,
        Permission::SprintView,
        Permission::SprintCreate,
        Permission::SprintUpdate,
        Permission::SprintDelete,
        Permission::SprintClose,
        Permission::AuditView,
        Permission::AuditExport,
        Permission::BackupView,
        Permission::BackupCreate,
        Permission::BackupRestore,
        Permission::AdminAccess,
        Permission::AdminFull,
    ];

    fn entry(self) -> &'static (Permission, &'static str, &'static str) {
        // TABLE is declared in variant order.
        &TABLE[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.entry().1
    }

    pub fn description(self) -> &'static str {
        self.entry().2
    }

    /// Permissions whose identifier starts with `prefix`, e.g. `"incident-"`.
    pub fn family(prefix: &str) -> impl Iterator<Item = Permission> + '_ {
        Self::ALL
            .into_iter()
            .filter(move |p| p.as_str().starts_with(prefix))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TABLE
            .iter()
            .find(|(_, id, _)| *id == s)
            .map(|(p, _, _)| *p)
            .ok_or_else(|| AuthError::InvalidInput(format!("unknown permission: {s}")))
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a list of identifiers, failing on the first unknown one.
pub fn parse_permissions<I, S>(ids: I) -> Result<Vec<Permission>, AuthError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter().map(|s| s.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_variant_order() {
        assert_eq!(TABLE.len(), Permission::ALL.len());
        for (i, p) in Permission::ALL.iter().enumerate() {
            assert_eq!(TABLE[i].0, *p);
            assert_eq!(*p as usize, i);
        }
    }

    #[test]
    fn identifiers_parse_back() {
        for p in Permission::ALL {
            assert_eq!(p.as_str().parse::<Permission>().unwrap(), p);
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("Incident-View".parse::<Permission>().is_err());
        assert!("incident-fly".parse::<Permission>().is_err());
    }

    #[test]
    fn incident_family_has_twelve_members() {
        assert_eq!(Permission::family("incident-").count(), 12);
        assert_eq!(Permission::family("sprint-").count(), 5);
        assert_eq!(Permission::family("project-").count(), 7);
    }

    #[test]
    fn serializes_as_identifier() {
        let json = serde_json::to_string(&vec![Permission::AuditView]).unwrap();
        assert_eq!(json, r#"["audit-view"]"#);
        let back: Vec<Permission> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Permission::AuditView]);
    }

    #[test]
    fn parse_permissions_reports_unknown() {
        let err = parse_permissions(["audit-view", "nope"]).unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(msg) if msg.contains("nope")));
    }
}
