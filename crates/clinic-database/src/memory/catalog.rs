//! Role, module, and permission catalogue.

use async_trait::async_trait;
use chrono::Utc;

use clinic_core::error::AppError;
use clinic_core::result::AppResult;
use clinic_core::types::{CatalogFilter, ModuleId, PermissionId, RoleId};
use clinic_entity::rbac::{
    CreateModule, CreatePermission, CreateRole, Module, Permission, Role, UpdateModule,
    UpdatePermission, UpdateRole,
};

use super::MemoryDatabase;
use crate::repository::{ModuleRepository, PermissionRepository, RoleRepository};

#[async_trait]
impl RoleRepository for MemoryDatabase {
    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.tables.read().await.roles.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let tables = self.tables.read().await;
        Ok(tables.roles.values().find(|r| r.role_name == name).cloned())
    }

    async fn list(&self, filter: &CatalogFilter) -> AppResult<Vec<Role>> {
        let tables = self.tables.read().await;
        let mut roles: Vec<Role> = tables
            .roles
            .values()
            .filter(|r| filter.matches(&r.role_name, r.description.as_deref(), r.is_active))
            .cloned()
            .collect();
        roles.sort_by(|a, b| a.role_name.cmp(&b.role_name));
        Ok(roles)
    }

    async fn create(&self, input: CreateRole) -> AppResult<Role> {
        let mut tables = self.tables.write().await;
        if tables.roles.values().any(|r| r.role_name == input.role_name) {
            return Err(AppError::conflict(format!(
                "Role '{}' already exists",
                input.role_name
            )));
        }
        let now = Utc::now();
        let role = Role {
            id: RoleId::new(),
            role_name: input.role_name,
            description: input.description,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        };
        tables.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn update(&self, id: RoleId, input: UpdateRole) -> AppResult<Option<Role>> {
        let mut tables = self.tables.write().await;
        if let Some(name) = &input.role_name {
            if tables.roles.values().any(|r| r.id != id && &r.role_name == name) {
                return Err(AppError::conflict(format!("Role '{name}' already exists")));
            }
        }
        let Some(role) = tables.roles.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = input.role_name {
            role.role_name = name;
        }
        if let Some(description) = input.description {
            role.description = Some(description);
        }
        if let Some(is_active) = input.is_active {
            role.is_active = is_active;
        }
        role.updated_at = Utc::now();
        Ok(Some(role.clone()))
    }

    async fn delete(&self, id: RoleId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.roles.remove(&id).is_none() {
            return Ok(false);
        }
        tables.role_permissions.retain(|(role_id, _), _| *role_id != id);
        tables.role_modules.retain(|(role_id, _), _| *role_id != id);
        for user in tables.users.values_mut() {
            if user.role_id == Some(id) {
                user.role_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl ModuleRepository for MemoryDatabase {
    async fn find_by_id(&self, id: ModuleId) -> AppResult<Option<Module>> {
        Ok(self.tables.read().await.modules.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Module>> {
        let tables = self.tables.read().await;
        Ok(tables
            .modules
            .values()
            .find(|m| m.module_name == name)
            .cloned())
    }

    async fn list(&self, filter: &CatalogFilter) -> AppResult<Vec<Module>> {
        let tables = self.tables.read().await;
        let mut modules: Vec<Module> = tables
            .modules
            .values()
            .filter(|m| filter.matches(&m.module_name, m.description.as_deref(), m.is_active))
            .cloned()
            .collect();
        modules.sort_by(|a, b| a.module_name.cmp(&b.module_name));
        Ok(modules)
    }

    async fn create(&self, input: CreateModule) -> AppResult<Module> {
        let mut tables = self.tables.write().await;
        if tables
            .modules
            .values()
            .any(|m| m.module_name == input.module_name)
        {
            return Err(AppError::conflict(format!(
                "Module '{}' already exists",
                input.module_name
            )));
        }
        let now = Utc::now();
        let module = Module {
            id: ModuleId::new(),
            module_name: input.module_name,
            description: input.description,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        };
        tables.modules.insert(module.id, module.clone());
        Ok(module)
    }

    async fn update(&self, id: ModuleId, input: UpdateModule) -> AppResult<Option<Module>> {
        let mut tables = self.tables.write().await;
        if let Some(name) = &input.module_name {
            if tables
                .modules
                .values()
                .any(|m| m.id != id && &m.module_name == name)
            {
                return Err(AppError::conflict(format!("Module '{name}' already exists")));
            }
        }
        let Some(module) = tables.modules.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = input.module_name {
            module.module_name = name;
        }
        if let Some(description) = input.description {
            module.description = Some(description);
        }
        if let Some(is_active) = input.is_active {
            module.is_active = is_active;
        }
        module.updated_at = Utc::now();
        Ok(Some(module.clone()))
    }

    async fn delete(&self, id: ModuleId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.permissions.values().any(|p| p.module_id == id) {
            return Err(AppError::conflict("Module still owns permissions"));
        }
        if tables.modules.remove(&id).is_none() {
            return Ok(false);
        }
        tables.role_modules.retain(|(_, module_id), _| *module_id != id);
        Ok(true)
    }
}

#[async_trait]
impl PermissionRepository for MemoryDatabase {
    async fn find_by_id(&self, id: PermissionId) -> AppResult<Option<Permission>> {
        Ok(self.tables.read().await.permissions.get(&id).cloned())
    }

    async fn find_by_name_in_module(
        &self,
        name: &str,
        module_id: ModuleId,
    ) -> AppResult<Option<Permission>> {
        let tables = self.tables.read().await;
        Ok(tables
            .permissions
            .values()
            .find(|p| p.module_id == module_id && p.permission_name == name)
            .cloned())
    }

    async fn list(
        &self,
        filter: &CatalogFilter,
        module_id: Option<ModuleId>,
    ) -> AppResult<Vec<Permission>> {
        let tables = self.tables.read().await;
        let mut permissions: Vec<Permission> = tables
            .permissions
            .values()
            .filter(|p| module_id.is_none_or(|m| p.module_id == m))
            .filter(|p| {
                filter.matches(&p.permission_name, p.description.as_deref(), p.is_active)
            })
            .cloned()
            .collect();
        permissions.sort_by(|a, b| a.permission_name.cmp(&b.permission_name));
        Ok(permissions)
    }

    async fn count_by_module(&self, module_id: ModuleId) -> AppResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .permissions
            .values()
            .filter(|p| p.module_id == module_id)
            .count() as u64)
    }

    async fn create(&self, input: CreatePermission) -> AppResult<Permission> {
        let mut tables = self.tables.write().await;
        if !tables.modules.contains_key(&input.module_id) {
            return Err(AppError::not_found(format!(
                "Module {} not found",
                input.module_id
            )));
        }
        if tables
            .permissions
            .values()
            .any(|p| p.module_id == input.module_id && p.permission_name == input.permission_name)
        {
            return Err(AppError::conflict(format!(
                "Permission '{}' already exists in module",
                input.permission_name
            )));
        }
        let now = Utc::now();
        let permission = Permission {
            id: PermissionId::new(),
            permission_name: input.permission_name,
            description: input.description,
            is_active: input.is_active,
            module_id: input.module_id,
            created_at: now,
            updated_at: now,
        };
        tables.permissions.insert(permission.id, permission.clone());
        Ok(permission)
    }

    async fn update(
        &self,
        id: PermissionId,
        input: UpdatePermission,
    ) -> AppResult<Option<Permission>> {
        let mut tables = self.tables.write().await;
        let Some(current) = tables.permissions.get(&id) else {
            return Ok(None);
        };
        let target_module = input.module_id.unwrap_or(current.module_id);
        let target_name = input
            .permission_name
            .clone()
            .unwrap_or_else(|| current.permission_name.clone());
        if tables.permissions.values().any(|p| {
            p.id != id && p.module_id == target_module && p.permission_name == target_name
        }) {
            return Err(AppError::conflict(format!(
                "Permission '{target_name}' already exists in module"
            )));
        }

        let Some(permission) = tables.permissions.get_mut(&id) else {
            return Ok(None);
        };
        permission.permission_name = target_name;
        permission.module_id = target_module;
        if let Some(description) = input.description {
            permission.description = Some(description);
        }
        if let Some(is_active) = input.is_active {
            permission.is_active = is_active;
        }
        permission.updated_at = Utc::now();
        Ok(Some(permission.clone()))
    }

    async fn delete(&self, id: PermissionId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.permissions.remove(&id).is_none() {
            return Ok(false);
        }
        tables
            .role_permissions
            .retain(|(_, permission_id), _| *permission_id != id);
        Ok(true)
    }
}
