//! Role grants.

use async_trait::async_trait;
use chrono::Utc;

use clinic_core::result::AppResult;
use clinic_core::types::{ModuleId, PermissionId, RoleId};
use clinic_entity::rbac::{
    EffectiveModule, EffectivePermission, GrantChange, ModulePermissionStatus, RoleModule,
    RoleModuleDetail, RolePermission, RolePermissionDetail, is_effective,
};

use super::MemoryDatabase;
use crate::repository::GrantRepository;

#[async_trait]
impl GrantRepository for MemoryDatabase {
    async fn upsert_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
        is_enabled: bool,
    ) -> AppResult<(RolePermission, GrantChange)> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        match tables.role_permissions.get_mut(&(role_id, permission_id)) {
            Some(grant) => {
                grant.is_enabled = is_enabled;
                grant.updated_at = now;
                Ok((grant.clone(), GrantChange::Updated))
            }
            None => {
                let grant = RolePermission {
                    role_id,
                    permission_id,
                    is_enabled,
                    created_at: now,
                    updated_at: now,
                };
                tables
                    .role_permissions
                    .insert((role_id, permission_id), grant.clone());
                Ok((grant, GrantChange::Created))
            }
        }
    }

    async fn delete_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .role_permissions
            .remove(&(role_id, permission_id))
            .is_some())
    }

    async fn role_permission_details(
        &self,
        role_id: Option<RoleId>,
    ) -> AppResult<Vec<RolePermissionDetail>> {
        let tables = self.tables.read().await;
        let mut details: Vec<RolePermissionDetail> = tables
            .role_permissions
            .values()
            .filter(|g| role_id.is_none_or(|r| g.role_id == r))
            .filter_map(|g| {
                let role = tables.roles.get(&g.role_id)?;
                let permission = tables.permissions.get(&g.permission_id)?;
                let module = tables.modules.get(&permission.module_id)?;
                Some(RolePermissionDetail {
                    role_id: g.role_id,
                    role_name: role.role_name.clone(),
                    permission_id: g.permission_id,
                    permission_name: permission.permission_name.clone(),
                    permission_description: permission.description.clone(),
                    permission_is_active: permission.is_active,
                    module_id: module.id,
                    module_name: module.module_name.clone(),
                    is_enabled: g.is_enabled,
                    is_effective: is_effective(g.is_enabled, permission.is_active),
                    created_at: g.created_at,
                    updated_at: g.updated_at,
                })
            })
            .collect();
        details.sort_by(|a, b| {
            (&a.role_name, &a.module_name, &a.permission_name).cmp(&(
                &b.role_name,
                &b.module_name,
                &b.permission_name,
            ))
        });
        Ok(details)
    }

    async fn module_permission_status(
        &self,
        role_id: RoleId,
        module_id: ModuleId,
    ) -> AppResult<Vec<ModulePermissionStatus>> {
        let tables = self.tables.read().await;
        let mut statuses: Vec<ModulePermissionStatus> = tables
            .permissions
            .values()
            .filter(|p| p.module_id == module_id && p.is_active)
            .map(|p| {
                let grant = tables.role_permissions.get(&(role_id, p.id));
                ModulePermissionStatus {
                    id: p.id,
                    permission_name: p.permission_name.clone(),
                    description: p.description.clone(),
                    is_assigned: grant.is_some(),
                    is_active_for_role: grant.is_some_and(|g| g.is_enabled),
                }
            })
            .collect();
        statuses.sort_by(|a, b| a.permission_name.cmp(&b.permission_name));
        Ok(statuses)
    }

    async fn effective_permissions(&self, role_id: RoleId) -> AppResult<Vec<EffectivePermission>> {
        let tables = self.tables.read().await;
        let mut effective: Vec<EffectivePermission> = tables
            .role_permissions
            .values()
            .filter(|g| g.role_id == role_id)
            .filter_map(|g| {
                let permission = tables.permissions.get(&g.permission_id)?;
                if !is_effective(g.is_enabled, permission.is_active) {
                    return None;
                }
                let module = tables.modules.get(&permission.module_id)?;
                Some(EffectivePermission {
                    id: permission.id,
                    permission_name: permission.permission_name.clone(),
                    description: permission.description.clone(),
                    module_id: module.id,
                    module_name: module.module_name.clone(),
                })
            })
            .collect();
        effective.sort_by(|a, b| {
            (&a.module_name, &a.permission_name).cmp(&(&b.module_name, &b.permission_name))
        });
        Ok(effective)
    }

    async fn upsert_role_module(
        &self,
        role_id: RoleId,
        module_id: ModuleId,
        is_enabled: bool,
    ) -> AppResult<(RoleModule, GrantChange)> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        match tables.role_modules.get_mut(&(role_id, module_id)) {
            Some(grant) => {
                grant.is_enabled = is_enabled;
                grant.updated_at = now;
                Ok((grant.clone(), GrantChange::Updated))
            }
            None => {
                let grant = RoleModule {
                    role_id,
                    module_id,
                    is_enabled,
                    created_at: now,
                    updated_at: now,
                };
                tables
                    .role_modules
                    .insert((role_id, module_id), grant.clone());
                Ok((grant, GrantChange::Created))
            }
        }
    }

    async fn delete_role_module(&self, role_id: RoleId, module_id: ModuleId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.role_modules.remove(&(role_id, module_id)).is_some())
    }

    async fn role_module_details(
        &self,
        role_id: Option<RoleId>,
    ) -> AppResult<Vec<RoleModuleDetail>> {
        let tables = self.tables.read().await;
        let mut details: Vec<RoleModuleDetail> = tables
            .role_modules
            .values()
            .filter(|g| role_id.is_none_or(|r| g.role_id == r))
            .filter_map(|g| {
                let role = tables.roles.get(&g.role_id)?;
                let module = tables.modules.get(&g.module_id)?;
                Some(RoleModuleDetail {
                    role_id: g.role_id,
                    role_name: role.role_name.clone(),
                    module_id: module.id,
                    module_name: module.module_name.clone(),
                    module_description: module.description.clone(),
                    module_is_active: module.is_active,
                    is_enabled: g.is_enabled,
                    is_effective: is_effective(g.is_enabled, module.is_active),
                    created_at: g.created_at,
                    updated_at: g.updated_at,
                })
            })
            .collect();
        details.sort_by(|a, b| {
            (&a.role_name, &a.module_name).cmp(&(&b.role_name, &b.module_name))
        });
        Ok(details)
    }

    async fn effective_modules(&self, role_id: RoleId) -> AppResult<Vec<EffectiveModule>> {
        let tables = self.tables.read().await;
        let mut effective: Vec<EffectiveModule> = tables
            .role_modules
            .values()
            .filter(|g| g.role_id == role_id)
            .filter_map(|g| {
                let module = tables.modules.get(&g.module_id)?;
                is_effective(g.is_enabled, module.is_active).then(|| EffectiveModule {
                    id: module.id,
                    module_name: module.module_name.clone(),
                    description: module.description.clone(),
                })
            })
            .collect();
        effective.sort_by(|a, b| a.module_name.cmp(&b.module_name));
        Ok(effective)
    }
}
