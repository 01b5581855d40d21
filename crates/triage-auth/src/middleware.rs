use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AuthError;
use crate::jwt::verify_jwt;
use crate::permissions::Permission;
use crate::resolver::PermissionResolver;
use crate::session::{Session, SessionUser};

/// Caller identity for one request, with a resolver bound to its session.
#[derive(Clone)]
pub struct AuthUser {
    pub user: SessionUser,
    pub resolver: Arc<PermissionResolver>,
}

impl AuthUser {
    pub fn from_user(user: SessionUser) -> Self {
        let session = Arc::new(Session::authenticated(user.clone()));
        let resolver = PermissionResolver::new(session);
        resolver.refresh();
        Self {
            user,
            resolver: Arc::new(resolver),
        }
    }
}

#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = parts
            .extensions
            .get::<AuthState>()
            .ok_or(AuthError::Internal("auth not configured".into()))?;

        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok());

        let bearer = match auth_header {
            Some(h) if h.starts_with("Bearer ") => &h[7..],
            _ => return Err(AuthError::Unauthorized),
        };

        let claims = verify_jwt(bearer, &auth_state.jwt_secret)?;
        Ok(AuthUser::from_user(SessionUser::from_claims(&claims)))
    }
}

pub fn require_permission(user: &AuthUser, permission: Permission) -> Result<(), AuthError> {
    if user.resolver.has_permission(permission) {
        Ok(())
    } else {
        Err(AuthError::Forbidden(format!(
            "missing permission: {permission}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;
    use crate::jwt::create_jwt;

    async fn extract(header: Option<String>) -> Result<AuthUser, AuthError> {
        let mut builder = Request::builder().uri("/api/access/me");
        if let Some(h) = header {
            builder = builder.header("Authorization", h);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        parts.extensions.insert(AuthState {
            jwt_secret: "secret".into(),
        });
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn bearer_token_builds_session() {
        let token = create_jwt("5", "diego", Some("desarrollador"), 600, "secret").unwrap();
        let user = extract(Some(format!("Bearer {token}"))).await.unwrap();
        assert_eq!(user.user.user_id, "5");
        assert!(require_permission(&user, Permission::IncidentLabelUpdate).is_ok());
        assert!(matches!(
            require_permission(&user, Permission::IncidentTitleUpdate),
            Err(AuthError::Forbidden(msg)) if msg.contains("incident-title-update")
        ));
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        assert!(matches!(extract(None).await, Err(AuthError::Unauthorized)));
        assert!(matches!(
            extract(Some("Basic abc".into())).await,
            Err(AuthError::Unauthorized)
        ));
    }
}
