//! Route definitions for the clinic HTTP API.
//!
//! Every API route is mounted under `server.api_prefix`; `/health` sits
//! outside it. Guarded routes declare their [`AccessPolicy`] here, next to
//! the path, and nowhere else.

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::{delete, get, post, put};

use clinic_auth::AccessPolicy;

use crate::handlers;
use crate::middleware;
use crate::middleware::access::guarded;
use crate::state::AppState;

const ASSIGN_ROLE_PERMISSION: AccessPolicy = AccessPolicy::permissions(&["ASSIGN_ROLE_PERMISSION"]);
const REMOVE_ROLE_PERMISSION: AccessPolicy = AccessPolicy::permissions(&["REMOVE_ROLE_PERMISSION"]);
const READ_ROLE_PERMISSION: AccessPolicy = AccessPolicy::permissions(&["READ_ROLE_PERMISSION"]);
const ASSIGN_ROLE_MODULE: AccessPolicy = AccessPolicy::permissions(&["ASSIGN_ROLE_MODULE"]);
const REMOVE_ROLE_MODULE: AccessPolicy = AccessPolicy::permissions(&["REMOVE_ROLE_MODULE"]);
const READ_ROLE_MODULE: AccessPolicy = AccessPolicy::permissions(&["READ_ROLE_MODULE"]);

/// Build the router with every route and the branch resolution layer.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(role_permission_routes(&state))
        .merge(role_module_routes(&state))
        .merge(role_routes(&state))
        .merge(module_routes(&state))
        .merge(permission_routes(&state))
        .merge(auth_routes(&state))
        .merge(context_routes());

    Router::new()
        .nest(&state.config.server.api_prefix, api_routes)
        .route("/health", get(handlers::health::health))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::branch::resolve_branch,
        ))
        .with_state(state)
}

/// Role-permission grants
fn role_permission_routes(state: &AppState) -> Router<AppState> {
    use handlers::role_permission as h;
    Router::new()
        .route(
            "/role-permissions/assign",
            guarded(state, ASSIGN_ROLE_PERMISSION, post(h::assign)),
        )
        .route(
            "/role-permissions/remove/{role_id}/{permission_id}",
            guarded(state, REMOVE_ROLE_PERMISSION, delete(h::remove)),
        )
        .route(
            "/role-permissions/role/{role_id}",
            guarded(state, READ_ROLE_PERMISSION, get(h::by_role)),
        )
        .route(
            "/role-permissions/role/{role_id}/module/{module_id}",
            guarded(state, READ_ROLE_PERMISSION, get(h::by_role_and_module)),
        )
        .route(
            "/role-permissions/all",
            guarded(state, READ_ROLE_PERMISSION, get(h::all)),
        )
}

/// Role-module grants
fn role_module_routes(state: &AppState) -> Router<AppState> {
    use handlers::role_module as h;
    Router::new()
        .route(
            "/role-modules/assign",
            guarded(state, ASSIGN_ROLE_MODULE, post(h::assign)),
        )
        .route(
            "/role-modules/remove/{role_id}/{module_id}",
            guarded(state, REMOVE_ROLE_MODULE, delete(h::remove)),
        )
        .route(
            "/role-modules/role/{role_id}",
            guarded(state, READ_ROLE_MODULE, get(h::by_role)),
        )
        .route(
            "/role-modules/all",
            guarded(state, READ_ROLE_MODULE, get(h::all)),
        )
}

/// Role catalogue
fn role_routes(state: &AppState) -> Router<AppState> {
    use handlers::role as h;
    Router::new()
        .route(
            "/roles",
            guarded(state, AccessPolicy::permissions(&["READ_ROLE"]), get(h::list)).merge(
                guarded(state, AccessPolicy::permissions(&["CREATE_ROLE"]), post(h::create)),
            ),
        )
        .route(
            "/roles/{id}",
            guarded(state, AccessPolicy::permissions(&["READ_ROLE"]), get(h::get))
                .merge(guarded(
                    state,
                    AccessPolicy::permissions(&["UPDATE_ROLE"]),
                    put(h::update),
                ))
                .merge(guarded(
                    state,
                    AccessPolicy::permissions(&["DELETE_ROLE"]),
                    delete(h::delete),
                )),
        )
}

/// Module catalogue
fn module_routes(state: &AppState) -> Router<AppState> {
    use handlers::module as h;
    Router::new()
        .route(
            "/module",
            guarded(state, AccessPolicy::permissions(&["READ_MODULE"]), get(h::list)).merge(
                guarded(state, AccessPolicy::permissions(&["CREATE_MODULE"]), post(h::create)),
            ),
        )
        .route(
            "/module/{id}",
            guarded(state, AccessPolicy::permissions(&["READ_MODULE"]), get(h::get))
                .merge(guarded(
                    state,
                    AccessPolicy::permissions(&["UPDATE_MODULE"]),
                    put(h::update),
                ))
                .merge(guarded(
                    state,
                    AccessPolicy::permissions(&["DELETE_MODULE"]),
                    delete(h::delete),
                )),
        )
}

/// Permission catalogue
fn permission_routes(state: &AppState) -> Router<AppState> {
    use handlers::permission as h;
    Router::new()
        .route(
            "/permission",
            guarded(state, AccessPolicy::permissions(&["READ_PERMISSION"]), get(h::list)).merge(
                guarded(
                    state,
                    AccessPolicy::permissions(&["CREATE_PERMISSION"]),
                    post(h::create),
                ),
            ),
        )
        .route(
            "/permission/{id}",
            guarded(state, AccessPolicy::permissions(&["READ_PERMISSION"]), get(h::get))
                .merge(guarded(
                    state,
                    AccessPolicy::permissions(&["UPDATE_PERMISSION"]),
                    put(h::update),
                ))
                .merge(guarded(
                    state,
                    AccessPolicy::permissions(&["DELETE_PERMISSION"]),
                    delete(h::delete),
                )),
        )
}

/// Caller profile and admin branch filter
fn auth_routes(state: &AppState) -> Router<AppState> {
    use handlers::auth as h;
    Router::new()
        .route(
            "/auth/profile-with-permissions",
            guarded(state, AccessPolicy::AUTHENTICATED, get(h::profile_with_permissions)),
        )
        .route(
            "/auth/admin-branch-filter",
            guarded(
                state,
                AccessPolicy::ADMIN,
                post(h::set_admin_branch_filter)
                    .get(h::get_admin_branch_filter)
                    .delete(h::clear_admin_branch_filter),
            ),
        )
        .route(
            "/auth/admin-branch-filter/all",
            guarded(
                state,
                AccessPolicy::ADMIN,
                delete(h::clear_all_admin_branch_filters),
            ),
        )
}

/// Branch context read-back; resolution runs, no policy applies
fn context_routes() -> Router<AppState> {
    Router::new().route("/context/branch", get(handlers::context::branch_context))
}
