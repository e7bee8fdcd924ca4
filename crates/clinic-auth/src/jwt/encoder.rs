//! Access token minting.
//!
//! Token issuance belongs to the identity provider; this encoder exists for
//! operational tooling and tests and produces tokens the decoder accepts.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use clinic_core::config::AuthConfig;
use clinic_core::error::AppError;
use clinic_core::result::AppResult;
use clinic_core::types::UserId;

use super::claims::Claims;

/// Creates signed HS256 access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.jwt_access_ttl_minutes as i64),
        }
    }

    /// Mint an access token with the configured TTL.
    pub fn issue(&self, user_id: UserId, email: Option<&str>) -> AppResult<String> {
        self.issue_with_ttl(user_id, email, self.access_ttl)
    }

    /// Mint an access token with an explicit TTL. Negative TTLs yield expired tokens.
    pub fn issue_with_ttl(
        &self,
        user_id: UserId,
        email: Option<&str>,
        ttl: Duration,
    ) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.map(String::from),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }
}
