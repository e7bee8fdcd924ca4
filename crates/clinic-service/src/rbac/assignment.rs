//! Role grant administration: permissions and modules assigned to roles.

use std::sync::Arc;

use tracing::info;

use clinic_core::error::AppError;
use clinic_core::messages::MessageKey;
use clinic_core::result::AppResult;
use clinic_core::types::{ModuleId, PermissionId, RoleId};
use clinic_database::{GrantRepository, ModuleRepository, PermissionRepository, RoleRepository};
use clinic_entity::rbac::{
    GrantChange, Module, Permission, Role, RoleModule, RoleModuleDetail, RoleModulePermissions,
    RolePermission, RolePermissionDetail,
};

/// Upserts, removes, and reads back role grants.
///
/// Assignment is idempotent in its final state: assigning the same pair
/// twice leaves exactly one row carrying the last `is_enabled` value.
#[derive(Debug, Clone)]
pub struct RbacAssignmentService {
    roles: Arc<dyn RoleRepository>,
    modules: Arc<dyn ModuleRepository>,
    permissions: Arc<dyn PermissionRepository>,
    grants: Arc<dyn GrantRepository>,
}

impl RbacAssignmentService {
    pub fn new(
        roles: Arc<dyn RoleRepository>,
        modules: Arc<dyn ModuleRepository>,
        permissions: Arc<dyn PermissionRepository>,
        grants: Arc<dyn GrantRepository>,
    ) -> Self {
        Self {
            roles,
            modules,
            permissions,
            grants,
        }
    }

    /// Grant a permission to a role, or rewrite the existing grant's flag.
    pub async fn assign_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
        is_enabled: bool,
    ) -> AppResult<(RolePermission, GrantChange)> {
        self.require_role(role_id).await?;
        self.require_permission(permission_id).await?;

        let (grant, change) = self
            .grants
            .upsert_role_permission(role_id, permission_id, is_enabled)
            .await?;

        info!(
            %role_id,
            %permission_id,
            is_enabled,
            ?change,
            "Role permission assigned"
        );
        Ok((grant, change))
    }

    /// Delete a role's permission grant.
    pub async fn remove_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        if !self
            .grants
            .delete_role_permission(role_id, permission_id)
            .await?
        {
            return Err(AppError::not_found(format!(
                "Permission {permission_id} is not assigned to role {role_id}"
            ))
            .with_key(MessageKey::AssignmentNotFound));
        }
        info!(%role_id, %permission_id, "Role permission removed");
        Ok(())
    }

    /// Every permission grant of a role with its effective flag.
    pub async fn role_permissions(&self, role_id: RoleId) -> AppResult<Vec<RolePermissionDetail>> {
        self.require_role(role_id).await?;
        self.grants.role_permission_details(Some(role_id)).await
    }

    /// The active permissions of one module and the role's standing on each.
    pub async fn role_permissions_by_module(
        &self,
        role_id: RoleId,
        module_id: ModuleId,
    ) -> AppResult<RoleModulePermissions> {
        let role = self.require_role(role_id).await?;
        let module = self.require_module(module_id).await?;
        let permissions = self
            .grants
            .module_permission_status(role_id, module_id)
            .await?;
        Ok(RoleModulePermissions {
            role,
            module,
            permissions,
        })
    }

    /// Every permission grant across all roles.
    pub async fn all_role_permissions(&self) -> AppResult<Vec<RolePermissionDetail>> {
        self.grants.role_permission_details(None).await
    }

    /// Grant a module to a role, or rewrite the existing grant's flag.
    pub async fn assign_module(
        &self,
        role_id: RoleId,
        module_id: ModuleId,
        is_enabled: bool,
    ) -> AppResult<(RoleModule, GrantChange)> {
        self.require_role(role_id).await?;
        self.require_module(module_id).await?;

        let (grant, change) = self
            .grants
            .upsert_role_module(role_id, module_id, is_enabled)
            .await?;

        info!(%role_id, %module_id, is_enabled, ?change, "Role module assigned");
        Ok((grant, change))
    }

    /// Delete a role's module grant.
    pub async fn remove_module(&self, role_id: RoleId, module_id: ModuleId) -> AppResult<()> {
        if !self.grants.delete_role_module(role_id, module_id).await? {
            return Err(AppError::not_found(format!(
                "Module {module_id} is not assigned to role {role_id}"
            ))
            .with_key(MessageKey::AssignmentNotFound));
        }
        info!(%role_id, %module_id, "Role module removed");
        Ok(())
    }

    /// Every module grant of a role with its effective flag.
    pub async fn role_modules(&self, role_id: RoleId) -> AppResult<Vec<RoleModuleDetail>> {
        self.require_role(role_id).await?;
        self.grants.role_module_details(Some(role_id)).await
    }

    /// Every module grant across all roles.
    pub async fn all_role_modules(&self) -> AppResult<Vec<RoleModuleDetail>> {
        self.grants.role_module_details(None).await
    }

    async fn require_role(&self, id: RoleId) -> AppResult<Role> {
        self.roles.find_by_id(id).await?.ok_or_else(|| {
            AppError::not_found(format!("Role {id} not found")).with_key(MessageKey::RoleNotFound)
        })
    }

    async fn require_module(&self, id: ModuleId) -> AppResult<Module> {
        self.modules.find_by_id(id).await?.ok_or_else(|| {
            AppError::not_found(format!("Module {id} not found"))
                .with_key(MessageKey::ModuleNotFound)
        })
    }

    async fn require_permission(&self, id: PermissionId) -> AppResult<Permission> {
        self.permissions.find_by_id(id).await?.ok_or_else(|| {
            AppError::not_found(format!("Permission {id} not found"))
                .with_key(MessageKey::PermissionNotFound)
        })
    }
}
