/// Access decisions across every role, session state and role change.
///
/// Run:
///   cargo test -p triage-auth --test resolver_properties
use std::sync::Arc;

use triage_auth::{Permission, PermissionResolver, RoleRegistry, Session, SessionUser};

fn user(role: Option<&str>) -> SessionUser {
    SessionUser {
        user_id: "101".into(),
        username: "valentina".into(),
        email: Some("valentina@example.com".into()),
        role_code: role.map(str::to_string),
    }
}

fn session_with(role: &str) -> (Arc<Session>, PermissionResolver) {
    let session = Arc::new(Session::new());
    session.login(user(Some(role)));
    let resolver = PermissionResolver::new(session.clone());
    resolver.refresh();
    (session, resolver)
}

#[test]
fn membership_matches_registry_for_every_role_and_permission() {
    for role in RoleRegistry::builtin().roles() {
        let (_, resolver) = session_with(role.code);
        for p in Permission::ALL {
            assert_eq!(
                resolver.has_permission(p),
                role.permissions.contains(&p),
                "role {} permission {}",
                role.code,
                p
            );
        }
        assert_eq!(resolver.permissions(), role.permissions);
    }
}

#[test]
fn unauthenticated_session_has_nothing() {
    let resolver = PermissionResolver::new(Arc::new(Session::new()));
    resolver.refresh();
    for p in Permission::ALL {
        assert!(!resolver.has_permission(p));
    }
    assert!(resolver.permissions().is_empty());
    assert_eq!(resolver.user_role(), None);
    assert!(resolver.role_descriptor().is_none());
}

#[test]
fn unknown_roles_fail_closed() {
    for code in ["root", "administrator", "admin ", "", "dev", "scrum-master"] {
        let (_, resolver) = session_with(code);
        assert!(resolver.permissions().is_empty(), "{code:?}");
        assert!(!Permission::ALL.iter().any(|p| resolver.has_permission(*p)));
    }
}

#[test]
fn empty_lists_under_any_session_state() {
    let logged_out = PermissionResolver::new(Arc::new(Session::new()));
    let (_, admin) = session_with("admin");
    let (_, unknown) = session_with("ghost");
    for resolver in [&logged_out, &admin, &unknown] {
        assert!(!resolver.has_any_permission(&[]));
        assert!(resolver.has_all_permissions(&[]));
    }
}

#[test]
fn refresh_is_idempotent() {
    let (_, resolver) = session_with("lider_tecnico");
    resolver.refresh();
    let first = resolver.permissions();
    resolver.refresh();
    assert_eq!(resolver.permissions(), first);
}

#[test]
fn role_codes_are_case_insensitive() {
    let (_, upper) = session_with("Admin");
    let (_, lower) = session_with("admin");
    let (_, shout) = session_with("ADMIN");
    assert_eq!(upper.permissions(), lower.permissions());
    assert_eq!(shout.permissions(), lower.permissions());
    assert!(upper.has_permission(Permission::AdminFull));
}

#[test]
fn desarrollador_edits_labels_but_not_titles() {
    let (_, resolver) = session_with("desarrollador");
    assert!(!resolver.has_permission_str("incident-title-update"));
    assert!(resolver.has_permission_str("incident-label-update"));
}

#[test]
fn admin_holds_audit_backup_and_admin() {
    let (_, resolver) = session_with("admin");
    assert!(resolver.has_all_permissions(&[
        Permission::AuditView,
        Permission::BackupRestore,
        Permission::AdminFull,
    ]));
}

#[test]
fn stakeholder_only_views() {
    let (_, resolver) = session_with("stakeholder");
    assert!(!resolver.has_any_permission(&[
        Permission::IncidentCreate,
        Permission::IncidentTitleUpdate,
    ]));
    assert!(resolver.has_permission(Permission::IncidentView));
}

#[test]
fn role_change_mid_session_then_refresh() {
    let (session, resolver) = session_with("stakeholder");
    assert!(!resolver.has_permission(Permission::AdminFull));
    assert!(!resolver.permissions().contains(&Permission::AdminFull));

    assert!(session.set_role(Some("admin".into())));
    resolver.refresh();

    assert!(resolver.has_permission(Permission::AdminFull));
    assert!(resolver.permissions().contains(&Permission::AdminFull));
    assert_eq!(resolver.role_descriptor().unwrap().code, "admin");
}

#[test]
fn logout_revokes_immediately() {
    let (session, resolver) = session_with("admin");
    session.logout();
    assert!(!resolver.has_permission(Permission::DashboardAccess));
    assert!(resolver.is_stale());
    assert!(resolver.permissions().is_empty());
    assert_eq!(resolver.user_role(), None);
}

#[test]
fn working_set_follows_session_without_refresh() {
    let session = Arc::new(Session::new());
    let resolver = PermissionResolver::new(session.clone());
    assert!(resolver.permissions().is_empty());

    session.login(user(Some("admin")));
    assert_eq!(resolver.permissions().len(), Permission::ALL.len());

    assert!(session.set_role(Some("stakeholder".into())));
    let stakeholder = RoleRegistry::builtin().resolve("stakeholder");
    assert_eq!(resolver.permissions(), stakeholder);

    session.logout();
    assert!(resolver.permissions().is_empty());
    assert!(!resolver.is_stale());
}

#[test]
fn working_set_agrees_with_membership_after_every_change() {
    let session = Arc::new(Session::new());
    let resolver = PermissionResolver::new(session.clone());
    let steps: [Box<dyn Fn() + '_>; 4] = [
        Box::new(|| session.login(user(Some("qa_tester")))),
        Box::new(|| {
            session.set_role(Some("ADMIN".into()));
        }),
        Box::new(|| {
            session.set_role(None);
        }),
        Box::new(|| session.logout()),
    ];
    for step in steps {
        step();
        let set = resolver.permissions();
        for p in Permission::ALL {
            assert_eq!(set.contains(&p), resolver.has_permission(p), "{p}");
        }
    }
}

#[test]
fn user_role_reports_raw_code_and_nothing_after_logout() {
    let (session, resolver) = session_with("Ghost");
    assert_eq!(resolver.user_role().as_deref(), Some("Ghost"));
    session.logout();
    assert_eq!(resolver.user_role(), None);
}

#[test]
fn resolver_is_shareable_across_threads() {
    let (_, resolver) = session_with("qa_tester");
    let resolver = Arc::new(resolver);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let r = resolver.clone();
            std::thread::spawn(move || r.has_permission(Permission::IncidentAssign))
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap());
    }
}
