//! `CurrentBranch` extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use clinic_auth::BranchContext;
use clinic_core::error::AppError;
use clinic_core::messages::MessageKey;

use crate::error::ApiError;

/// The branch the resolution middleware attached to this request.
#[derive(Debug, Clone)]
pub struct CurrentBranch(pub BranchContext);

impl<S: Send + Sync> FromRequestParts<S> for CurrentBranch {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<BranchContext>()
            .cloned()
            .map(CurrentBranch)
            .ok_or_else(|| {
                AppError::validation("No branch was resolved for this route")
                    .with_key(MessageKey::BranchUndetermined)
                    .into()
            })
    }
}
