//! Caller-centric handlers: own permissions and the admin branch filter.

use axum::extract::State;

use clinic_core::messages::MessageKey;
use clinic_entity::rbac::UserPermissions;

use crate::dto::ApiResponse;
use crate::dto::request::SetAdminBranchFilterRequest;
use crate::dto::response::{AdminBranchFilterResponse, ClearedFiltersResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /auth/profile-with-permissions
pub async fn profile_with_permissions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiResponse<UserPermissions>> {
    let projection = state.user_permission_service.project(&auth).await?;
    Ok(ApiResponse::ok(MessageKey::UserProfileFetched, projection))
}

/// POST /auth/admin-branch-filter
pub async fn set_admin_branch_filter(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<SetAdminBranchFilterRequest>,
) -> ApiResult<ApiResponse<AdminBranchFilterResponse>> {
    let branch_id = state
        .admin_filter_service
        .set(auth.user.id, &req.branch_id)
        .await?;
    Ok(ApiResponse::ok(
        MessageKey::AdminBranchFilterSet,
        AdminBranchFilterResponse {
            branch_id: Some(branch_id),
        },
    ))
}

/// GET /auth/admin-branch-filter
pub async fn get_admin_branch_filter(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResponse<AdminBranchFilterResponse> {
    ApiResponse::ok(
        MessageKey::AdminBranchFilterFetched,
        AdminBranchFilterResponse {
            branch_id: state.admin_filter_service.get(auth.user.id),
        },
    )
}

/// DELETE /auth/admin-branch-filter
pub async fn clear_admin_branch_filter(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResponse<AdminBranchFilterResponse> {
    state.admin_filter_service.clear(auth.user.id);
    ApiResponse::ok(
        MessageKey::AdminBranchFilterCleared,
        AdminBranchFilterResponse { branch_id: None },
    )
}

/// DELETE /auth/admin-branch-filter/all
pub async fn clear_all_admin_branch_filters(
    State(state): State<AppState>,
) -> ApiResponse<ClearedFiltersResponse> {
    let cleared = state.admin_filter_service.clear_all();
    ApiResponse::ok(
        MessageKey::AdminBranchFilterCleared,
        ClearedFiltersResponse { cleared },
    )
}
