use anyhow::{Result, bail};

use triage_auth::{RequireMode, RouteGuard, parse_permissions};

use super::offline_resolver;

pub fn run(role: &str, all: bool, permissions: &[String]) -> Result<()> {
    let required = parse_permissions(permissions)?;
    let guard = RouteGuard {
        required,
        mode: if all { RequireMode::All } else { RequireMode::Any },
    };

    let resolver = offline_resolver(role);
    if resolver.role_descriptor().is_none() {
        eprintln!("warning: role {role:?} is not in the registry, it grants nothing");
    }

    for p in &guard.required {
        let mark = if resolver.has_permission(*p) { "yes" } else { "no " };
        println!("  [{mark}] {p}");
    }

    if guard.allows(&resolver) {
        println!("allowed");
        Ok(())
    } else {
        bail!("denied for role {role}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn any_mode_passes_with_one_grant() {
        assert!(run("desarrollador", false, &ids(&["incident-title-update", "incident-comment"])).is_ok());
    }

    #[test]
    fn all_mode_fails_with_one_missing() {
        assert!(run("desarrollador", true, &ids(&["incident-title-update", "incident-comment"])).is_err());
    }

    #[test]
    fn unknown_permission_is_an_error() {
        let err = run("admin", false, &ids(&["incident-teleport"])).unwrap_err();
        assert!(err.to_string().contains("incident-teleport"));
    }

    #[test]
    fn unknown_role_is_denied() {
        assert!(run("janitor", false, &ids(&["dashboard-access"])).is_err());
    }
}
