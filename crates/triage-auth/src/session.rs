use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::jwt::AuthClaims;

/// Identity of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: String,
    pub username: String,
    pub email: Option<String>,
    pub role_code: Option<String>,
}

impl SessionUser {
    /// Identity decoded from a verified credential. The user id is the `sub` claim.
    pub fn from_claims(claims: &AuthClaims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            username: claims.username.clone(),
            email: claims.email.clone(),
            role_code: claims.role.clone(),
        }
    }
}

/// Read side of the session, as seen by the permission resolver.
pub trait SessionSource: Send + Sync {
    fn current_role_code(&self) -> Option<String>;
    fn is_authenticated(&self) -> bool;
    /// Bumped on every session mutation.
    fn version(&self) -> u64;
}

/// Current authenticated user, cleared on logout.
#[derive(Debug, Default)]
pub struct Session {
    user: RwLock<Option<SessionUser>>,
    version: AtomicU64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authenticated(user: SessionUser) -> Self {
        Self {
            user: RwLock::new(Some(user)),
            version: AtomicU64::new(1),
        }
    }

    pub fn login(&self, user: SessionUser) {
        tracing::debug!(user_id = %user.user_id, role = ?user.role_code, "session login");
        self.write(Some(user));
    }

    pub fn logout(&self) {
        tracing::debug!("session logout");
        self.write(None);
    }

    /// Change the role of the logged-in user. Returns false when nobody is logged in.
    pub fn set_role(&self, role_code: Option<String>) -> bool {
        let Ok(mut guard) = self.user.write() else {
            tracing::error!("session lock poisoned, role change dropped");
            return false;
        };
        match guard.as_mut() {
            Some(user) => {
                tracing::debug!(from = ?user.role_code, to = ?role_code, "session role change");
                user.role_code = role_code;
                self.version.fetch_add(1, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }

    pub fn user(&self) -> Option<SessionUser> {
        match self.user.read() {
            Ok(guard) => guard.clone(),
            Err(_) => {
                tracing::error!("session lock poisoned, treating as unauthenticated");
                None
            }
        }
    }

    pub fn user_id(&self) -> Option<String> {
        self.user().map(|u| u.user_id)
    }

    fn write(&self, user: Option<SessionUser>) {
        match self.user.write() {
            Ok(mut guard) => *guard = user,
            Err(poisoned) => {
                tracing::error!("session lock poisoned, overwriting");
                *poisoned.into_inner() = user;
            }
        }
        self.version.fetch_add(1, Ordering::SeqCst);
    }
}

impl SessionSource for Session {
    fn current_role_code(&self) -> Option<String> {
        self.user().and_then(|u| u.role_code)
    }

    fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> SessionUser {
        SessionUser {
            user_id: "42".into(),
            username: "ana".into(),
            email: None,
            role_code: Some(role.into()),
        }
    }

    #[test]
    fn new_session_is_unauthenticated() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.current_role_code(), None);
        assert_eq!(session.user_id(), None);
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn login_and_logout_bump_version() {
        let session = Session::new();
        session.login(user("qa_tester"));
        assert_eq!(session.version(), 1);
        assert_eq!(session.current_role_code().as_deref(), Some("qa_tester"));
        assert_eq!(session.user_id().as_deref(), Some("42"));

        session.logout();
        assert_eq!(session.version(), 2);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn set_role_requires_login() {
        let session = Session::new();
        assert!(!session.set_role(Some("admin".into())));
        assert_eq!(session.version(), 0);

        session.login(user("stakeholder"));
        assert!(session.set_role(Some("admin".into())));
        assert_eq!(session.current_role_code().as_deref(), Some("admin"));
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn from_claims_uses_subject_as_user_id() {
        let claims = AuthClaims {
            sub: "user-7".into(),
            username: "luis".into(),
            email: Some("luis@example.com".into()),
            role: Some("desarrollador".into()),
            exp: 0,
            iat: 0,
        };
        let u = SessionUser::from_claims(&claims);
        assert_eq!(u.user_id, "user-7");
        assert_eq!(u.role_code.as_deref(), Some("desarrollador"));
        assert_eq!(u.email.as_deref(), Some("luis@example.com"));
    }
}
