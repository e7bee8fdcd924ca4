//! Role catalogue handlers.

use axum::extract::{Path, State};

use clinic_core::messages::MessageKey;
use clinic_core::types::{CatalogFilter, RoleId};
use clinic_entity::rbac::Role;

use crate::dto::ApiResponse;
use crate::dto::request::{CreateRoleRequest, UpdateRoleRequest};
use crate::error::ApiResult;
use crate::extractors::{ApiQuery, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /roles
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<CatalogFilter>,
) -> ApiResult<ApiResponse<Vec<Role>>> {
    let roles = state.role_service.list(&filter).await?;
    Ok(ApiResponse::ok(MessageKey::RoleFound, roles))
}

/// POST /roles
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateRoleRequest>,
) -> ApiResult<ApiResponse<Role>> {
    let role = state.role_service.create(req.into()).await?;
    Ok(ApiResponse::created(MessageKey::RoleCreated, role))
}

/// GET /roles/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Role>> {
    let id: RoleId = parse_id(&id, "id")?;
    let role = state.role_service.get(id).await?;
    Ok(ApiResponse::ok(MessageKey::RoleFound, role))
}

/// PUT /roles/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<ApiResponse<Role>> {
    let id: RoleId = parse_id(&id, "id")?;
    let role = state.role_service.update(id, req.into()).await?;
    Ok(ApiResponse::ok(MessageKey::RoleUpdated, role))
}

/// DELETE /roles/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id: RoleId = parse_id(&id, "id")?;
    state.role_service.delete(id).await?;
    Ok(ApiResponse::ok(MessageKey::RoleDeleted, ()))
}
