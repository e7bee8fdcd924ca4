//! `AuthUser` extractor: the verified caller with its role.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use clinic_auth::identity::bearer_token;
use clinic_entity::user::UserWithRole;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user available in handlers.
///
/// Guarded routes find the user the access guard already loaded; anywhere
/// else the bearer token is verified here.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserWithRole);

impl std::ops::Deref for AuthUser {
    type Target = UserWithRole;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The bearer token of a request, if any.
pub fn request_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }
        let user = state.identity.authenticate(request_token(parts)).await?;
        Ok(AuthUser(user))
    }
}
