//! Role-permission grant handlers.

use axum::extract::{Path, State};

use clinic_core::messages::MessageKey;
use clinic_core::types::{ModuleId, PermissionId, RoleId};
use clinic_entity::rbac::{GrantChange, RoleModulePermissions, RolePermission, RolePermissionDetail};

use crate::dto::ApiResponse;
use crate::dto::request::AssignRolePermissionRequest;
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, parse_id};
use crate::state::AppState;

/// POST /role-permissions/assign
pub async fn assign(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AssignRolePermissionRequest>,
) -> ApiResult<ApiResponse<RolePermission>> {
    let (grant, change) = state
        .assignment_service
        .assign_permission(req.role_id, req.permission_id, req.is_enabled)
        .await?;
    Ok(match change {
        GrantChange::Created => ApiResponse::created(MessageKey::RolePermissionAssigned, grant),
        GrantChange::Updated => ApiResponse::ok(MessageKey::RolePermissionUpdated, grant),
    })
}

/// DELETE /role-permissions/remove/{roleId}/{permissionId}
pub async fn remove(
    State(state): State<AppState>,
    Path((role_id, permission_id)): Path<(String, String)>,
) -> ApiResult<ApiResponse<()>> {
    let role_id: RoleId = parse_id(&role_id, "roleId")?;
    let permission_id: PermissionId = parse_id(&permission_id, "permissionId")?;
    state
        .assignment_service
        .remove_permission(role_id, permission_id)
        .await?;
    Ok(ApiResponse::ok(MessageKey::RolePermissionRemoved, ()))
}

/// GET /role-permissions/role/{roleId}
pub async fn by_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<ApiResponse<Vec<RolePermissionDetail>>> {
    let role_id: RoleId = parse_id(&role_id, "roleId")?;
    let rows = state.assignment_service.role_permissions(role_id).await?;
    Ok(ApiResponse::ok(MessageKey::RolePermissionFound, rows))
}

/// GET /role-permissions/role/{roleId}/module/{moduleId}
pub async fn by_role_and_module(
    State(state): State<AppState>,
    Path((role_id, module_id)): Path<(String, String)>,
) -> ApiResult<ApiResponse<RoleModulePermissions>> {
    let role_id: RoleId = parse_id(&role_id, "roleId")?;
    let module_id: ModuleId = parse_id(&module_id, "moduleId")?;
    let view = state
        .assignment_service
        .role_permissions_by_module(role_id, module_id)
        .await?;
    Ok(ApiResponse::ok(MessageKey::RolePermissionFound, view))
}

/// GET /role-permissions/all
pub async fn all(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<RolePermissionDetail>>> {
    let rows = state.assignment_service.all_role_permissions().await?;
    Ok(ApiResponse::ok(MessageKey::RolePermissionFound, rows))
}
