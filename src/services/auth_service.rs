use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::utils::AppError;

pub const ADMIN_ROLE: &str = "admin";

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,           // user_id (acting user)
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub iat: usize,            // issued at
    pub exp: usize,            // expiration
    pub jti: String,           // JWT ID
    pub aud: String,           // audience
    pub iss: String,           // issuer
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }

    /// Rejects callers without the admin role.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            log::warn!("⛔ User {} is not an administrator", self.sub);
            Err(AppError::Forbidden("You are not authorized to perform this operation!".to_string()))
        }
    }
}

/// Token verification settings, read once at startup and shared through
/// `web::Data<JwtConfig>`.
#[derive(Clone)]
pub struct JwtConfig {
    secret: String,
    issuer: String,
    audience: String,
}

impl JwtConfig {
    /// `JWT_SECRET` is mandatory; issuer and audience have defaults.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| "JWT_SECRET must be set".to_string())?;

        Ok(JwtConfig {
            secret,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "campsite-service".to_string()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "campsite-api".to_string()),
        })
    }

    // Verify JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.audience.as_str()]);

        let mut issuers = HashSet::new();
        issuers.insert(self.issuer.clone());
        validation.iss = Some(issuers);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation
        )
        .map(|data| data.claims)
        .map_err(|e| format!("Invalid token: {}", e))
    }
}

#[cfg(test)]
impl JwtConfig {
    pub fn for_tests() -> Self {
        JwtConfig {
            secret: "test-secret".to_string(),
            issuer: "campsite-service".to_string(),
            audience: "campsite-api".to_string(),
        }
    }

    /// Signs a token the same way the identity provider does.
    pub fn issue_token(&self, user_id: &str, roles: &[&str]) -> String {
        Self::sign(&self.secret, self, user_id, roles)
    }

    /// Signs with an arbitrary key but this config's issuer and audience.
    pub fn sign(secret: &str, config: &JwtConfig, user_id: &str, roles: &[&str]) -> String {
        use chrono::{Duration, Utc};
        use jsonwebtoken::{encode, EncodingKey, Header};

        let claims = Claims {
            sub: user_id.to_string(),
            email: format!("{}@example.com", user_id),
            name: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
            iat: Utc::now().timestamp() as usize,
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
            jti: uuid::Uuid::new_v4().to_string(),
            aud: config.audience.clone(),
            iss: config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
            .expect("token encoding")
    }
}

/// Test shorthand for `JwtConfig::for_tests().issue_token(..)`.
#[cfg(test)]
pub fn issue_token(user_id: &str, roles: &[&str]) -> String {
    JwtConfig::for_tests().issue_token(user_id, roles)
}

/// Test shorthand for `JwtConfig::for_tests().verify_token(..)`.
#[cfg(test)]
pub fn verify_token(token: &str) -> Result<Claims, String> {
    JwtConfig::for_tests().verify_token(token)
}
