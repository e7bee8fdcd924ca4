//! Route access guard.
//!
//! Each guarded route carries an [`AccessPolicy`] fixed when the router is
//! built. The guard needs a verified caller (401 otherwise) and applies the
//! policy through the shared [`clinic_auth::Authorizer`] (403 on failure).

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::MethodRouter;

use clinic_auth::identity::bearer_token;
use clinic_auth::{AccessPolicy, BranchContext};

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// State handed to one guard instance.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    state: AppState,
    policy: AccessPolicy,
}

/// Wrap a method router so its handlers only run for callers meeting `policy`.
pub fn guarded(
    state: &AppState,
    policy: AccessPolicy,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(
        AccessGuard {
            state: state.clone(),
            policy,
        },
        enforce,
    ))
}

async fn enforce(
    State(guard): State<AccessGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Branch resolution may already have loaded the caller.
    let resolved = request
        .extensions()
        .get::<BranchContext>()
        .and_then(|ctx| ctx.current_user.clone());

    let user = match resolved {
        Some(user) => user,
        None => {
            let token = request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(bearer_token)
                .map(str::to_owned);
            guard.state.identity.authenticate(token.as_deref()).await?
        }
    };

    guard.state.authorizer.authorize(&user, &guard.policy).await?;

    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}
