use crate::auth::{AuthError, AuthResult};

/// Authentication configuration loaded from environment variables.
///
/// The signing secret is read exactly once at ignite and lives here for the
/// life of the process; nothing ever logs or re-exposes it.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    pub fn from_env() -> AuthResult<Self> {
        let jwt_secret = std::env::var("STOREFRONT_JWT_SECRET")
            .map_err(|_| AuthError::Config("STOREFRONT_JWT_SECRET is required".into()))?;
        let token_ttl_secs = std::env::var("STOREFRONT_TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(3600);

        Ok(Self {
            jwt_secret,
            token_ttl_secs,
        })
    }
}
