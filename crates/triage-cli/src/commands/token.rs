use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use triage_auth::{PermissionResolver, Session, SessionUser, create_jwt, verify_jwt};
use triage_core::TriageConfig;

pub fn issue(user_id: &str, username: &str, role: Option<&str>, base_dir: &Path) -> Result<()> {
    let config = TriageConfig::load_or_default(&TriageConfig::default_path(base_dir))?;
    let token = create_jwt(
        user_id,
        username,
        role,
        config.access.token_ttl_secs,
        &config.access.jwt_secret,
    )?;
    println!("{token}");
    Ok(())
}

pub fn whoami(token: &str, base_dir: &Path) -> Result<()> {
    let config = TriageConfig::load_or_default(&TriageConfig::default_path(base_dir))?;
    let claims = verify_jwt(token, &config.access.jwt_secret)?;

    let session = Arc::new(Session::new());
    session.login(SessionUser::from_claims(&claims));
    let resolver = PermissionResolver::new(session.clone());
    resolver.refresh();

    let report = serde_json::json!({
        "user": session.user(),
        "role": resolver.role_descriptor().map(|r| r.display_name),
        "permissions": resolver.permissions(),
        "expires_at": claims.exp,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn whoami_accepts_issued_token() {
        let tmp = TempDir::new().unwrap();
        let config = TriageConfig::default_config();
        config.save(&TriageConfig::default_path(tmp.path())).unwrap();

        let token = create_jwt(
            "8",
            "pablo",
            Some("qa_tester"),
            60,
            &config.access.jwt_secret,
        )
        .unwrap();
        assert!(whoami(&token, tmp.path()).is_ok());
    }

    #[test]
    fn whoami_rejects_foreign_token() {
        let tmp = TempDir::new().unwrap();
        let token = create_jwt("8", "pablo", None, 60, "someone-else").unwrap();
        assert!(whoami(&token, tmp.path()).is_err());
    }
}
