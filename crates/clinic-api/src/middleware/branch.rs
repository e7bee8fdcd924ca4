//! Branch resolution middleware.
//!
//! Runs on every request. The resolver decides whether the path takes part
//! in resolution; resolved contexts are inserted into the request extensions
//! for [`crate::extractors::CurrentBranch`] and the access guard.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use clinic_auth::identity::bearer_token;
use clinic_auth::{BranchRequest, Resolution};

use crate::error::ApiError;
use crate::state::AppState;

/// Resolve the request's branch or reject it with the branch error envelope.
pub async fn resolve_branch(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let (path, token, admin_branch, branch) = {
        let headers = request.headers();
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        let token = header(AUTHORIZATION.as_str())
            .as_deref()
            .and_then(bearer_token)
            .map(str::to_owned);
        (
            request.uri().path().to_owned(),
            token,
            header(&state.config.branch.admin_header),
            header(&state.config.branch.branch_header),
        )
    };

    let resolution = state
        .resolver
        .resolve(BranchRequest {
            path: &path,
            bearer_token: token.as_deref(),
            admin_branch: admin_branch.as_deref(),
            branch: branch.as_deref(),
        })
        .await?;

    if let Resolution::Resolved(context) = resolution {
        request.extensions_mut().insert(context);
    }
    Ok(next.run(request).await)
}
