use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthClaims {
    pub sub: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

pub fn create_jwt(
    user_id: &str,
    username: &str,
    role: Option<&str>,
    ttl_secs: u64,
    secret: &str,
) -> Result<String, AuthError> {
    if user_id.is_empty() {
        return Err(AuthError::InvalidInput("user id required".into()));
    }
    if ttl_secs == 0 {
        return Err(AuthError::InvalidInput("token lifetime must be positive".into()));
    }
    let now = chrono::Utc::now().timestamp() as usize;
    let exp = usize::try_from(ttl_secs)
        .ok()
        .and_then(|ttl| now.checked_add(ttl))
        .ok_or_else(|| AuthError::InvalidInput(format!("token lifetime out of range: {ttl_secs}s")))?;
    let claims = AuthClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        email: None,
        role: role.map(str::to_string),
        exp,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode error: {e}")))
}

pub fn verify_jwt(token: &str, secret: &str) -> Result<AuthClaims, AuthError> {
    let data = decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("credential rejected: {e}");
        AuthError::Unauthorized
    })?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let token = create_jwt("17", "carla", Some("qa_tester"), 3600, "secret").unwrap();
        let claims = verify_jwt(&token, "secret").unwrap();
        assert_eq!(claims.sub, "17");
        assert_eq!(claims.username, "carla");
        assert_eq!(claims.role.as_deref(), Some("qa_tester"));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let token = create_jwt("17", "carla", None, 3600, "secret").unwrap();
        assert!(matches!(
            verify_jwt(&token, "other"),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = AuthClaims {
            sub: "17".into(),
            username: "carla".into(),
            email: None,
            role: Some("admin".into()),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert!(matches!(
            verify_jwt(&token, "secret"),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn empty_user_id_is_rejected() {
        assert!(matches!(
            create_jwt("", "carla", None, 60, "secret"),
            Err(AuthError::InvalidInput(_))
        ));
    }

    #[test]
    fn unrepresentable_lifetime_is_rejected() {
        for ttl in [0, u64::MAX, u64::MAX - 1] {
            assert!(
                matches!(
                    create_jwt("17", "carla", None, ttl, "secret"),
                    Err(AuthError::InvalidInput(_))
                ),
                "ttl {ttl}"
            );
        }
    }
}
