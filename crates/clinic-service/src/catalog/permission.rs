//! Permission catalogue service.

use std::sync::Arc;

use tracing::info;

use clinic_core::error::AppError;
use clinic_core::messages::MessageKey;
use clinic_core::result::AppResult;
use clinic_core::types::{CatalogFilter, ModuleId, PermissionId};
use clinic_database::{ModuleRepository, PermissionRepository};
use clinic_entity::rbac::{CreatePermission, Permission, UpdatePermission};

use super::{keyed_conflict, required_name};

/// Permission CRUD. Names are unique within the owning module.
#[derive(Debug, Clone)]
pub struct PermissionService {
    permissions: Arc<dyn PermissionRepository>,
    modules: Arc<dyn ModuleRepository>,
}

impl PermissionService {
    pub fn new(
        permissions: Arc<dyn PermissionRepository>,
        modules: Arc<dyn ModuleRepository>,
    ) -> Self {
        Self {
            permissions,
            modules,
        }
    }

    pub async fn list(
        &self,
        filter: &CatalogFilter,
        module_id: Option<ModuleId>,
    ) -> AppResult<Vec<Permission>> {
        self.permissions.list(filter, module_id).await
    }

    pub async fn get(&self, id: PermissionId) -> AppResult<Permission> {
        self.permissions
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, mut input: CreatePermission) -> AppResult<Permission> {
        input.permission_name = required_name(&input.permission_name, "permissionName")?;
        self.require_module(input.module_id).await?;
        if self
            .permissions
            .find_by_name_in_module(&input.permission_name, input.module_id)
            .await?
            .is_some()
        {
            return Err(name_taken(&input.permission_name));
        }

        let permission = self
            .permissions
            .create(input)
            .await
            .map_err(|e| keyed_conflict(e, MessageKey::PermissionNameTaken))?;
        info!(
            permission_id = %permission.id,
            permission_name = %permission.permission_name,
            module_id = %permission.module_id,
            "Permission created"
        );
        Ok(permission)
    }

    /// Partial update. Renames and module moves keep the per-module uniqueness.
    pub async fn update(
        &self,
        id: PermissionId,
        mut input: UpdatePermission,
    ) -> AppResult<Permission> {
        let current = self.get(id).await?;
        if let Some(module_id) = input.module_id {
            self.require_module(module_id).await?;
        }
        if let Some(name) = &input.permission_name {
            input.permission_name = Some(required_name(name, "permissionName")?);
        }

        let name = input
            .permission_name
            .as_deref()
            .unwrap_or(&current.permission_name);
        let module_id = input.module_id.unwrap_or(current.module_id);
        if let Some(existing) = self
            .permissions
            .find_by_name_in_module(name, module_id)
            .await?
            && existing.id != id
        {
            return Err(name_taken(name));
        }

        let permission = self
            .permissions
            .update(id, input)
            .await
            .map_err(|e| keyed_conflict(e, MessageKey::PermissionNameTaken))?
            .ok_or_else(|| not_found(id))?;
        info!(permission_id = %id, "Permission updated");
        Ok(permission)
    }

    /// Delete a permission and every grant referencing it.
    pub async fn delete(&self, id: PermissionId) -> AppResult<()> {
        if !self.permissions.delete(id).await? {
            return Err(not_found(id));
        }
        info!(permission_id = %id, "Permission deleted");
        Ok(())
    }

    async fn require_module(&self, id: ModuleId) -> AppResult<()> {
        match self.modules.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("Module {id} not found"))
                .with_key(MessageKey::ModuleNotFound)),
        }
    }
}

fn not_found(id: PermissionId) -> AppError {
    AppError::not_found(format!("Permission {id} not found"))
        .with_key(MessageKey::PermissionNotFound)
}

fn name_taken(name: &str) -> AppError {
    AppError::conflict(format!("Permission '{name}' already exists in this module"))
        .with_key(MessageKey::PermissionNameTaken)
}
