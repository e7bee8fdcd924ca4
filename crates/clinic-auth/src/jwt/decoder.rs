//! Signature-verified access token decoding.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use clinic_core::config::AuthConfig;
use clinic_core::error::AppError;
use clinic_core::result::AppResult;

use super::claims::Claims;

/// Verifies HS256 access tokens.
///
/// Every caller that needs an identity goes through this decoder; there is
/// no unverified decoding path.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature and expiry, returning the claims.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::authentication("Invalid token format")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use clinic_core::ErrorKind;
    use clinic_core::types::UserId;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_decode_roundtrip() {
        let cfg = config("test-secret");
        let user_id = UserId::new();
        let token = JwtEncoder::new(&cfg)
            .issue(user_id, Some("ana@clinic.test"))
            .expect("encode");

        let claims = JwtDecoder::new(&cfg).decode(&token).expect("decode");
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.email.as_deref(), Some("ana@clinic.test"));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = JwtEncoder::new(&config("one"))
            .issue(UserId::new(), None)
            .expect("encode");

        let err = JwtDecoder::new(&config("two"))
            .decode(&token)
            .expect_err("signature mismatch");
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let cfg = config("test-secret");
        let token = JwtEncoder::new(&cfg)
            .issue_with_ttl(UserId::new(), None, chrono::Duration::minutes(-10))
            .expect("encode");

        assert!(JwtDecoder::new(&cfg).decode(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let decoder = JwtDecoder::new(&config("test-secret"));
        assert!(decoder.decode("not.a.token").is_err());
        assert!(decoder.decode("").is_err());
    }
}
