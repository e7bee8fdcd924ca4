//! Module catalogue service.

use std::sync::Arc;

use tracing::info;

use clinic_core::error::AppError;
use clinic_core::messages::MessageKey;
use clinic_core::result::AppResult;
use clinic_core::types::{CatalogFilter, ModuleId};
use clinic_database::{ModuleRepository, PermissionRepository};
use clinic_entity::rbac::{CreateModule, Module, UpdateModule};

use super::{keyed_conflict, required_name};

/// Module CRUD. A module that still owns permissions cannot be deleted.
#[derive(Debug, Clone)]
pub struct ModuleService {
    modules: Arc<dyn ModuleRepository>,
    permissions: Arc<dyn PermissionRepository>,
}

impl ModuleService {
    pub fn new(
        modules: Arc<dyn ModuleRepository>,
        permissions: Arc<dyn PermissionRepository>,
    ) -> Self {
        Self {
            modules,
            permissions,
        }
    }

    pub async fn list(&self, filter: &CatalogFilter) -> AppResult<Vec<Module>> {
        self.modules.list(filter).await
    }

    pub async fn get(&self, id: ModuleId) -> AppResult<Module> {
        self.modules
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, mut input: CreateModule) -> AppResult<Module> {
        input.module_name = required_name(&input.module_name, "moduleName")?;
        if self.modules.find_by_name(&input.module_name).await?.is_some() {
            return Err(name_taken(&input.module_name));
        }

        let module = self
            .modules
            .create(input)
            .await
            .map_err(|e| keyed_conflict(e, MessageKey::ModuleNameTaken))?;
        info!(module_id = %module.id, module_name = %module.module_name, "Module created");
        Ok(module)
    }

    pub async fn update(&self, id: ModuleId, mut input: UpdateModule) -> AppResult<Module> {
        if let Some(name) = &input.module_name {
            let name = required_name(name, "moduleName")?;
            if let Some(existing) = self.modules.find_by_name(&name).await?
                && existing.id != id
            {
                return Err(name_taken(&name));
            }
            input.module_name = Some(name);
        }

        let module = self
            .modules
            .update(id, input)
            .await
            .map_err(|e| keyed_conflict(e, MessageKey::ModuleNameTaken))?
            .ok_or_else(|| not_found(id))?;
        info!(module_id = %id, "Module updated");
        Ok(module)
    }

    pub async fn delete(&self, id: ModuleId) -> AppResult<()> {
        let module = self.get(id).await?;
        let owned = self.permissions.count_by_module(id).await?;
        if owned > 0 {
            return Err(AppError::conflict(format!(
                "Module '{}' still owns {owned} permission(s)",
                module.module_name
            ))
            .with_key(MessageKey::ModuleInUse));
        }

        if !self
            .modules
            .delete(id)
            .await
            .map_err(|e| keyed_conflict(e, MessageKey::ModuleInUse))?
        {
            return Err(not_found(id));
        }
        info!(module_id = %id, module_name = %module.module_name, "Module deleted");
        Ok(())
    }
}

fn not_found(id: ModuleId) -> AppError {
    AppError::not_found(format!("Module {id} not found")).with_key(MessageKey::ModuleNotFound)
}

fn name_taken(name: &str) -> AppError {
    AppError::conflict(format!("Module '{name}' already exists"))
        .with_key(MessageKey::ModuleNameTaken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::ErrorKind;
    use clinic_database::{MemoryDatabase, Repositories};

    fn service() -> ModuleService {
        let repos = Repositories::memory(MemoryDatabase::seeded());
        ModuleService::new(repos.modules, repos.permissions)
    }

    fn create(name: &str) -> CreateModule {
        CreateModule {
            module_name: name.to_string(),
            description: Some("Billing".to_string()),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_and_filter() {
        let modules = service();
        modules.create(create("BILLING")).await.expect("create");

        let err = modules.create(create("BILLING")).await.expect_err("dup");
        assert_eq!(err.message_key(), MessageKey::ModuleNameTaken);

        let found = modules
            .list(&CatalogFilter {
                search: Some("bill".to_string()),
                is_active: Some(true),
            })
            .await
            .expect("list");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].module_name, "BILLING");
    }

    #[tokio::test]
    async fn test_delete_guards_owned_permissions() {
        let modules = service();
        let patients = modules
            .list(&CatalogFilter {
                search: Some("PATIENTS".to_string()),
                is_active: None,
            })
            .await
            .expect("list")
            .remove(0);

        let err = modules.delete(patients.id).await.expect_err("in use");
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message_key(), MessageKey::ModuleInUse);

        let empty = modules.create(create("EMPTY")).await.expect("create");
        modules.delete(empty.id).await.expect("delete");
        let err = modules.get(empty.id).await.expect_err("gone");
        assert_eq!(err.message_key(), MessageKey::ModuleNotFound);
    }
}
