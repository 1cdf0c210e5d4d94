use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Name of the cookie the session token travels in.
pub const SESSION_COOKIE: &str = "la_comedia_admin";

/// Claims carried by a session token. The token is a capability, not an
/// identity: `sub` is always `"admin"`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Proof that a request passed the admin gate, injected into request
/// extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("incorrect password")]
    InvalidCredential,
    #[error("session expired or invalid")]
    InvalidSession,
    #[error("session token generation failed: {0}")]
    TokenGeneration(String),
}

/// Single-secret admin gate.
///
/// Validates the shared admin password and issues signed, time-bounded
/// session tokens. Verification is stateless: validity is `now` against
/// `iat + ttl`, no server-side session registry. Logout is expressed by
/// clearing the cookie, which does not invalidate a copied token before it
/// expires; accepted at this trust level.
pub struct SessionGate {
    password_digest: [u8; 32],
    password_set: bool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    cookie_secure: bool,
}

impl SessionGate {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            password_digest: Sha256::digest(security.admin_password.as_bytes()).into(),
            password_set: !security.admin_password.is_empty(),
            encoding_key: EncodingKey::from_secret(security.session_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(security.session_secret.as_bytes()),
            ttl: Duration::hours(security.session_ttl_hours),
            cookie_secure: security.cookie_secure,
        }
    }

    /// Check the submitted password against the configured secret and issue
    /// a session token on match.
    pub fn authenticate(&self, submitted: &str) -> Result<String, AuthError> {
        if !self.password_set || submitted.is_empty() {
            return Err(AuthError::InvalidCredential);
        }

        // Comparing fixed-size digests keeps the comparison independent of
        // the submitted length.
        let submitted_digest: [u8; 32] = Sha256::digest(submitted.as_bytes()).into();
        if submitted_digest != self.password_digest {
            return Err(AuthError::InvalidCredential);
        }

        self.issue_token_at(Utc::now())
    }

    fn issue_token_at(&self, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: "admin".to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Validate a presented token: signature, subject, and expiry with zero
    /// leeway.
    pub fn verify(&self, token: &str) -> Result<AdminSession, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.sub = Some("admin".to_string());

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidSession)?;

        let issued_at =
            DateTime::from_timestamp(data.claims.iat, 0).ok_or(AuthError::InvalidSession)?;
        let expires_at =
            DateTime::from_timestamp(data.claims.exp, 0).ok_or(AuthError::InvalidSession)?;

        Ok(AdminSession {
            issued_at,
            expires_at,
        })
    }

    /// Cookie carrying a freshly issued token: HttpOnly, SameSite=Lax,
    /// path-scoped to the whole site, Max-Age equal to the session TTL.
    pub fn login_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .path("/")
            .max_age(time::Duration::seconds(self.ttl.num_seconds()))
            .build()
    }

    /// Cookie that deletes the session marker (Max-Age 0).
    pub fn logout_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .path("/")
            .max_age(time::Duration::ZERO)
            .build()
    }
}
