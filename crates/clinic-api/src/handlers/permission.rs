//! Permission catalogue handlers.

use axum::extract::{Path, State};

use clinic_core::messages::MessageKey;
use clinic_core::types::{CatalogFilter, PermissionId};
use clinic_entity::rbac::Permission;

use crate::dto::ApiResponse;
use crate::dto::request::{CreatePermissionRequest, PermissionQuery, UpdatePermissionRequest};
use crate::error::ApiResult;
use crate::extractors::{ApiQuery, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /permission
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PermissionQuery>,
) -> ApiResult<ApiResponse<Vec<Permission>>> {
    let filter = CatalogFilter {
        search: query.search,
        is_active: query.is_active,
    };
    let permissions = state
        .permission_service
        .list(&filter, query.module_id)
        .await?;
    Ok(ApiResponse::ok(MessageKey::PermissionFound, permissions))
}

/// POST /permission
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreatePermissionRequest>,
) -> ApiResult<ApiResponse<Permission>> {
    let permission = state.permission_service.create(req.into()).await?;
    Ok(ApiResponse::created(MessageKey::PermissionCreated, permission))
}

/// GET /permission/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Permission>> {
    let id: PermissionId = parse_id(&id, "id")?;
    let permission = state.permission_service.get(id).await?;
    Ok(ApiResponse::ok(MessageKey::PermissionFound, permission))
}

/// PUT /permission/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePermissionRequest>,
) -> ApiResult<ApiResponse<Permission>> {
    let id: PermissionId = parse_id(&id, "id")?;
    let permission = state.permission_service.update(id, req.into()).await?;
    Ok(ApiResponse::ok(MessageKey::PermissionUpdated, permission))
}

/// DELETE /permission/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id: PermissionId = parse_id(&id, "id")?;
    state.permission_service.delete(id).await?;
    Ok(ApiResponse::ok(MessageKey::PermissionDeleted, ()))
}
