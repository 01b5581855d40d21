//! Named access questions asked by screens, each a fixed combination of
//! single-permission checks.

use crate::permissions::Permission as P;
use crate::resolver::PermissionResolver;

impl PermissionResolver {
    fn either(&self, a: P, b: P) -> bool {
        self.has_permission(a) || self.has_permission(b)
    }

    pub fn can_view_dashboard(&self) -> bool {
        self.either(P::DashboardAccess, P::DashboardFull)
    }

    pub fn has_full_dashboard(&self) -> bool {
        self.has_permission(P::DashboardFull)
    }

    pub fn can_view_users(&self) -> bool {
        self.either(P::UserView, P::UserManage)
    }

    pub fn can_manage_users(&self) -> bool {
        self.either(P::UserManage, P::AdminFull)
    }

    pub fn can_view_projects(&self) -> bool {
        self.either(P::ProjectView, P::ProjectManage)
    }

    pub fn can_create_project(&self) -> bool {
        self.either(P::ProjectCreate, P::ProjectManage)
    }

    pub fn can_manage_projects(&self) -> bool {
        self.has_permission(P::ProjectManage)
    }

    pub fn can_manage_project_members(&self) -> bool {
        self.has_permission(P::ProjectManage)
            || self.has_all_permissions(&[P::ProjectMemberAdd, P::ProjectMemberRemove])
    }

    pub fn can_view_incidents(&self) -> bool {
        self.either(P::IncidentView, P::IncidentFull)
    }

    pub fn can_create_incident(&self) -> bool {
        self.either(P::IncidentCreate, P::IncidentFull)
    }

    pub fn can_edit_incident_title(&self) -> bool {
        self.either(P::IncidentTitleUpdate, P::IncidentFull)
    }

    pub fn can_edit_incident_description(&self) -> bool {
        self.either(P::IncidentDescriptionUpdate, P::IncidentFull)
    }

    pub fn can_edit_incident_labels(&self) -> bool {
        self.either(P::IncidentLabelUpdate, P::IncidentFull)
    }

    pub fn can_edit_incident_data(&self) -> bool {
        self.either(P::IncidentDataUpdate, P::IncidentFull)
    }

    pub fn can_change_incident_status(&self) -> bool {
        self.either(P::IncidentStatusUpdate, P::IncidentFull)
    }

    pub fn can_assign_incidents(&self) -> bool {
        self.either(P::IncidentAssign, P::IncidentFull)
    }

    pub fn can_close_incidents(&self) -> bool {
        self.either(P::IncidentClose, P::IncidentFull)
    }

    pub fn can_comment_incidents(&self) -> bool {
        self.either(P::IncidentComment, P::IncidentFull)
    }

    pub fn can_attach_files(&self) -> bool {
        self.either(P::IncidentAttachment, P::IncidentFull)
    }

    pub fn can_view_sprints(&self) -> bool {
        self.has_permission(P::SprintView)
    }

    pub fn can_manage_sprints(&self) -> bool {
        self.has_all_permissions(&[P::SprintCreate, P::SprintUpdate])
    }

    pub fn can_close_sprints(&self) -> bool {
        self.has_permission(P::SprintClose)
    }

    pub fn can_view_audit(&self) -> bool {
        self.has_permission(P::AuditView)
    }

    pub fn can_export_audit(&self) -> bool {
        self.has_permission(P::AuditExport)
    }

    pub fn can_manage_backups(&self) -> bool {
        self.has_all_permissions(&[P::BackupCreate, P::BackupRestore])
    }

    pub fn is_admin(&self) -> bool {
        self.has_permission(P::AdminFull)
    }
}
