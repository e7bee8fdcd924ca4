//! Role-module grant handlers.

use axum::extract::{Path, State};

use clinic_core::messages::MessageKey;
use clinic_core::types::{ModuleId, RoleId};
use clinic_entity::rbac::{GrantChange, RoleModule, RoleModuleDetail};

use crate::dto::ApiResponse;
use crate::dto::request::AssignRoleModuleRequest;
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, parse_id};
use crate::state::AppState;

/// POST /role-modules/assign
pub async fn assign(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AssignRoleModuleRequest>,
) -> ApiResult<ApiResponse<RoleModule>> {
    let (grant, change) = state
        .assignment_service
        .assign_module(req.role_id, req.module_id, req.is_enabled)
        .await?;
    Ok(match change {
        GrantChange::Created => ApiResponse::created(MessageKey::RoleModuleAssigned, grant),
        GrantChange::Updated => ApiResponse::ok(MessageKey::RoleModuleUpdated, grant),
    })
}

/// DELETE /role-modules/remove/{roleId}/{moduleId}
pub async fn remove(
    State(state): State<AppState>,
    Path((role_id, module_id)): Path<(String, String)>,
) -> ApiResult<ApiResponse<()>> {
    let role_id: RoleId = parse_id(&role_id, "roleId")?;
    let module_id: ModuleId = parse_id(&module_id, "moduleId")?;
    state
        .assignment_service
        .remove_module(role_id, module_id)
        .await?;
    Ok(ApiResponse::ok(MessageKey::RoleModuleRemoved, ()))
}

/// GET /role-modules/role/{roleId}
pub async fn by_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<ApiResponse<Vec<RoleModuleDetail>>> {
    let role_id: RoleId = parse_id(&role_id, "roleId")?;
    let rows = state.assignment_service.role_modules(role_id).await?;
    Ok(ApiResponse::ok(MessageKey::RoleModuleFound, rows))
}

/// GET /role-modules/all
pub async fn all(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<RoleModuleDetail>>> {
    let rows = state.assignment_service.all_role_modules().await?;
    Ok(ApiResponse::ok(MessageKey::RoleModuleFound, rows))
}
