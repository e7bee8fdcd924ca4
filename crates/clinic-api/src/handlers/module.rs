//! Module catalogue handlers.

use axum::extract::{Path, State};

use clinic_core::messages::MessageKey;
use clinic_core::types::{CatalogFilter, ModuleId};
use clinic_entity::rbac::Module;

use crate::dto::ApiResponse;
use crate::dto::request::{CreateModuleRequest, UpdateModuleRequest};
use crate::error::ApiResult;
use crate::extractors::{ApiQuery, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /module
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<CatalogFilter>,
) -> ApiResult<ApiResponse<Vec<Module>>> {
    let modules = state.module_service.list(&filter).await?;
    Ok(ApiResponse::ok(MessageKey::ModuleFound, modules))
}

/// POST /module
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateModuleRequest>,
) -> ApiResult<ApiResponse<Module>> {
    let module = state.module_service.create(req.into()).await?;
    Ok(ApiResponse::created(MessageKey::ModuleCreated, module))
}

/// GET /module/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Module>> {
    let id: ModuleId = parse_id(&id, "id")?;
    let module = state.module_service.get(id).await?;
    Ok(ApiResponse::ok(MessageKey::ModuleFound, module))
}

/// PUT /module/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateModuleRequest>,
) -> ApiResult<ApiResponse<Module>> {
    let id: ModuleId = parse_id(&id, "id")?;
    let module = state.module_service.update(id, req.into()).await?;
    Ok(ApiResponse::ok(MessageKey::ModuleUpdated, module))
}

/// DELETE /module/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id: ModuleId = parse_id(&id, "id")?;
    state.module_service.delete(id).await?;
    Ok(ApiResponse::ok(MessageKey::ModuleDeleted, ()))
}
