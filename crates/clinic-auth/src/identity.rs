//! Bearer token to user-with-role resolution.

use std::sync::Arc;

use tracing::debug;

use clinic_core::error::AppError;
use clinic_core::messages::MessageKey;
use clinic_core::result::AppResult;
use clinic_database::UserRepository;
use clinic_entity::user::UserWithRole;

use crate::jwt::JwtDecoder;

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// Returns `None` for other schemes and for an empty token.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Loads the caller's user and role from a verified access token.
#[derive(Debug, Clone)]
pub struct IdentityLoader {
    decoder: JwtDecoder,
    users: Arc<dyn UserRepository>,
}

impl IdentityLoader {
    pub fn new(decoder: JwtDecoder, users: Arc<dyn UserRepository>) -> Self {
        Self { decoder, users }
    }

    /// Lenient identification: any token problem means "no identity".
    ///
    /// Repository failures still propagate.
    pub async fn identify(&self, token: Option<&str>) -> AppResult<Option<UserWithRole>> {
        let Some(token) = token else {
            return Ok(None);
        };
        let claims = match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e.message, "Ignoring undecodable bearer token");
                return Ok(None);
            }
        };
        self.users.find_with_role(claims.user_id()).await
    }

    /// Strict authentication: a verified token for an existing user is required.
    pub async fn authenticate(&self, token: Option<&str>) -> AppResult<UserWithRole> {
        let token = token.ok_or_else(|| {
            AppError::authentication("Missing bearer token").with_key(MessageKey::ErrorUnauthorized)
        })?;
        let claims = self
            .decoder
            .decode(token)
            .map_err(|e| e.with_key(MessageKey::ErrorUnauthorized))?;
        self.users
            .find_with_role(claims.user_id())
            .await?
            .ok_or_else(|| {
                AppError::authentication(format!("User {} no longer exists", claims.sub))
                    .with_key(MessageKey::ErrorUnauthorized)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::ErrorKind;
    use clinic_core::config::AuthConfig;
    use clinic_core::types::UserId;
    use clinic_database::MemoryDatabase;

    use crate::jwt::JwtEncoder;

    fn loader(db: &MemoryDatabase) -> (IdentityLoader, JwtEncoder) {
        let config = AuthConfig::default();
        (
            IdentityLoader::new(JwtDecoder::new(&config), Arc::new(db.clone())),
            JwtEncoder::new(&config),
        )
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[tokio::test]
    async fn test_identify_swallows_bad_tokens() {
        let db = MemoryDatabase::seeded();
        let (loader, _) = loader(&db);
        assert!(loader.identify(Some("garbage")).await.expect("lenient").is_none());
        assert!(loader.identify(None).await.expect("lenient").is_none());
    }

    #[tokio::test]
    async fn test_identify_loads_user() {
        let db = MemoryDatabase::seeded();
        let user = db.insert_user("ana@clinic.test", None, None).await;
        let (loader, encoder) = loader(&db);
        let token = encoder.issue(user.id, None).expect("token");

        let found = loader.identify(Some(&token)).await.expect("query");
        assert_eq!(found.map(|u| u.user.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_authenticate_requires_existing_user() {
        let db = MemoryDatabase::seeded();
        let (loader, encoder) = loader(&db);
        let token = encoder.issue(UserId::new(), None).expect("token");

        let err = loader
            .authenticate(Some(&token))
            .await
            .expect_err("unknown user");
        assert_eq!(err.kind, ErrorKind::Authentication);

        let err = loader.authenticate(None).await.expect_err("missing token");
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
