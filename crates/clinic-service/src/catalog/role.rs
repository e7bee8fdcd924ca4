//! Role catalogue service.

use std::sync::Arc;

use tracing::info;

use clinic_core::error::AppError;
use clinic_core::messages::MessageKey;
use clinic_core::result::AppResult;
use clinic_core::types::{CatalogFilter, RoleId};
use clinic_database::{RoleRepository, UserRepository};
use clinic_entity::rbac::{CreateRole, Role, UpdateRole};

use super::{keyed_conflict, required_name};

/// Role CRUD with name uniqueness and an in-use guard on deletion.
#[derive(Debug, Clone)]
pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
    users: Arc<dyn UserRepository>,
}

impl RoleService {
    pub fn new(roles: Arc<dyn RoleRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { roles, users }
    }

    pub async fn list(&self, filter: &CatalogFilter) -> AppResult<Vec<Role>> {
        self.roles.list(filter).await
    }

    pub async fn get(&self, id: RoleId) -> AppResult<Role> {
        self.roles.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, mut input: CreateRole) -> AppResult<Role> {
        input.role_name = required_name(&input.role_name, "roleName")?;
        if self.roles.find_by_name(&input.role_name).await?.is_some() {
            return Err(name_taken(&input.role_name));
        }

        let role = self
            .roles
            .create(input)
            .await
            .map_err(|e| keyed_conflict(e, MessageKey::RoleNameTaken))?;
        info!(role_id = %role.id, role_name = %role.role_name, "Role created");
        Ok(role)
    }

    pub async fn update(&self, id: RoleId, mut input: UpdateRole) -> AppResult<Role> {
        if let Some(name) = &input.role_name {
            let name = required_name(name, "roleName")?;
            if let Some(existing) = self.roles.find_by_name(&name).await?
                && existing.id != id
            {
                return Err(name_taken(&name));
            }
            input.role_name = Some(name);
        }

        let role = self
            .roles
            .update(id, input)
            .await
            .map_err(|e| keyed_conflict(e, MessageKey::RoleNameTaken))?
            .ok_or_else(|| not_found(id))?;
        info!(role_id = %id, "Role updated");
        Ok(role)
    }

    /// Delete a role and its grants. Roles still held by users are kept.
    pub async fn delete(&self, id: RoleId) -> AppResult<()> {
        let role = self.get(id).await?;
        let holders = self.users.count_by_role(id).await?;
        if holders > 0 {
            return Err(AppError::conflict(format!(
                "Role '{}' is assigned to {holders} user(s)",
                role.role_name
            ))
            .with_key(MessageKey::RoleInUse));
        }

        if !self.roles.delete(id).await? {
            return Err(not_found(id));
        }
        info!(role_id = %id, role_name = %role.role_name, "Role deleted");
        Ok(())
    }
}

fn not_found(id: RoleId) -> AppError {
    AppError::not_found(format!("Role {id} not found")).with_key(MessageKey::RoleNotFound)
}

fn name_taken(name: &str) -> AppError {
    AppError::conflict(format!("Role '{name}' already exists")).with_key(MessageKey::RoleNameTaken)
}
