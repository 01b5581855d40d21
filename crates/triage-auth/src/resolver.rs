use std::sync::{Arc, Mutex, MutexGuard};

use crate::permissions::{Permission, PermissionSet};
use crate::roles::{RoleDescriptor, RoleRegistry};
use crate::session::SessionSource;

struct Snapshot {
    version: u64,
    permissions: PermissionSet,
}

/// Fail-closed access decisions for the role held by a session.
///
/// `has_permission` and the list queries always read the live session role.
/// `permissions` returns a memoized working set, re-derived whenever the
/// session version moved past the one it was derived at.
pub struct PermissionResolver {
    session: Arc<dyn SessionSource>,
    registry: Arc<RoleRegistry>,
    snapshot: Mutex<Option<Snapshot>>,
}

impl PermissionResolver {
    pub fn new(session: Arc<dyn SessionSource>) -> Self {
        Self::with_registry(session, RoleRegistry::shared())
    }

    pub fn with_registry(session: Arc<dyn SessionSource>, registry: Arc<RoleRegistry>) -> Self {
        Self {
            session,
            registry,
            snapshot: Mutex::new(None),
        }
    }

    /// Re-derive the working permission set from the session's current role.
    pub fn refresh(&self) {
        let snapshot = self.derive();
        tracing::debug!(
            role = ?self.session.current_role_code(),
            permissions = snapshot.permissions.len(),
            "permissions refreshed"
        );
        *self.lock_snapshot() = Some(snapshot);
    }

    /// Working permission set for the current session.
    pub fn permissions(&self) -> PermissionSet {
        let mut guard = self.lock_snapshot();
        let current = self.session.version();
        match guard.as_ref() {
            Some(s) if s.version == current => s.permissions.clone(),
            _ => {
                let snapshot = self.derive();
                let permissions = snapshot.permissions.clone();
                *guard = Some(snapshot);
                permissions
            }
        }
    }

    /// True when the session changed after the working set was derived.
    pub fn is_stale(&self) -> bool {
        match self.lock_snapshot().as_ref() {
            Some(s) => s.version != self.session.version(),
            None => true,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.live_role().is_some_and(|r| r.grants(permission))
    }

    /// Identifier form of `has_permission`. Unknown identifiers are denied.
    pub fn has_permission_str(&self, permission: &str) -> bool {
        permission
            .parse::<Permission>()
            .is_ok_and(|p| self.has_permission(p))
    }

    /// False for an empty list.
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(*p))
    }

    /// True for an empty list.
    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(*p))
    }

    /// Raw role code of the session, whether or not the registry knows it.
    pub fn user_role(&self) -> Option<String> {
        self.session.current_role_code()
    }

    pub fn role_descriptor(&self) -> Option<&RoleDescriptor> {
        self.live_role()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    fn live_role(&self) -> Option<&RoleDescriptor> {
        let code = self.user_role()?;
        self.registry.lookup(&code)
    }

    fn derive(&self) -> Snapshot {
        // Read the version first so a concurrent mutation leaves the snapshot stale.
        let version = self.session.version();
        let permissions = match self.user_role() {
            Some(code) => {
                if self.registry.lookup(&code).is_none() {
                    tracing::warn!(role = %code, "unknown role code, granting no permissions");
                }
                self.registry.resolve(&code)
            }
            None => PermissionSet::new(),
        };
        Snapshot {
            version,
            permissions,
        }
    }

    fn lock_snapshot(&self) -> MutexGuard<'_, Option<Snapshot>> {
        self.snapshot.lock().unwrap_or_else(|e| e.into_inner())
    }
}
