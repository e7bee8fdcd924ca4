//! Role, module, and permission catalogue repositories.

use async_trait::async_trait;
use sqlx::PgPool;

use clinic_core::result::AppResult;
use clinic_core::types::{CatalogFilter, ModuleId, PermissionId, RoleId};
use clinic_entity::rbac::{
    CreateModule, CreatePermission, CreateRole, Module, Permission, Role, UpdateModule,
    UpdatePermission, UpdateRole,
};

use super::{db_error, like_pattern};
use crate::repository::{ModuleRepository, PermissionRepository, RoleRepository};

/// Role catalogue over PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find role by id", e))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE role_name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find role by name", e))
    }

    async fn list(&self, filter: &CatalogFilter) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>(
            "SELECT * FROM roles \
             WHERE ($1::boolean IS NULL OR is_active = $1) \
               AND ($2::text IS NULL OR role_name ILIKE $2 OR description ILIKE $2) \
             ORDER BY role_name",
        )
        .bind(filter.is_active)
        .bind(like_pattern(filter.search_term()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list roles", e))
    }

    async fn create(&self, input: CreateRole) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (role_name, description, is_active) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&input.role_name)
        .bind(&input.description)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create role", e))
    }

    async fn update(&self, id: RoleId, input: UpdateRole) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>(
            "UPDATE roles SET \
                role_name = COALESCE($2, role_name), \
                description = COALESCE($3, description), \
                is_active = COALESCE($4, is_active), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&input.role_name)
        .bind(&input.description)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update role", e))
    }

    async fn delete(&self, id: RoleId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete role", e))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Module catalogue over PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgModuleRepository {
    pool: PgPool,
}

impl PgModuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModuleRepository for PgModuleRepository {
    async fn find_by_id(&self, id: ModuleId) -> AppResult<Option<Module>> {
        sqlx::query_as::<_, Module>("SELECT * FROM modules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find module by id", e))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Module>> {
        sqlx::query_as::<_, Module>("SELECT * FROM modules WHERE module_name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find module by name", e))
    }

    async fn list(&self, filter: &CatalogFilter) -> AppResult<Vec<Module>> {
        sqlx::query_as::<_, Module>(
            "SELECT * FROM modules \
             WHERE ($1::boolean IS NULL OR is_active = $1) \
               AND ($2::text IS NULL OR module_name ILIKE $2 OR description ILIKE $2) \
             ORDER BY module_name",
        )
        .bind(filter.is_active)
        .bind(like_pattern(filter.search_term()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list modules", e))
    }

    async fn create(&self, input: CreateModule) -> AppResult<Module> {
        sqlx::query_as::<_, Module>(
            "INSERT INTO modules (module_name, description, is_active) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&input.module_name)
        .bind(&input.description)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create module", e))
    }

    async fn update(&self, id: ModuleId, input: UpdateModule) -> AppResult<Option<Module>> {
        sqlx::query_as::<_, Module>(
            "UPDATE modules SET \
                module_name = COALESCE($2, module_name), \
                description = COALESCE($3, description), \
                is_active = COALESCE($4, is_active), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&input.module_name)
        .bind(&input.description)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update module", e))
    }

    async fn delete(&self, id: ModuleId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete module", e))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Permission catalogue over PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgPermissionRepository {
    pool: PgPool,
}

impl PgPermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionRepository for PgPermissionRepository {
    async fn find_by_id(&self, id: PermissionId) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find permission by id", e))
    }

    async fn find_by_name_in_module(
        &self,
        name: &str,
        module_id: ModuleId,
    ) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions WHERE permission_name = $1 AND module_id = $2",
        )
        .bind(name)
        .bind(module_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find permission by name", e))
    }

    async fn list(
        &self,
        filter: &CatalogFilter,
        module_id: Option<ModuleId>,
    ) -> AppResult<Vec<Permission>> {
        sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions \
             WHERE ($1::boolean IS NULL OR is_active = $1) \
               AND ($2::text IS NULL OR permission_name ILIKE $2 OR description ILIKE $2) \
               AND ($3::uuid IS NULL OR module_id = $3) \
             ORDER BY permission_name",
        )
        .bind(filter.is_active)
        .bind(like_pattern(filter.search_term()))
        .bind(module_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list permissions", e))
    }

    async fn count_by_module(&self, module_id: ModuleId) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM permissions WHERE module_id = $1")
                .bind(module_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count permissions by module", e))?;
        Ok(count as u64)
    }

    async fn create(&self, input: CreatePermission) -> AppResult<Permission> {
        sqlx::query_as::<_, Permission>(
            "INSERT INTO permissions (permission_name, description, is_active, module_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&input.permission_name)
        .bind(&input.description)
        .bind(input.is_active)
        .bind(input.module_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create permission", e))
    }

    async fn update(
        &self,
        id: PermissionId,
        input: UpdatePermission,
    ) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>(
            "UPDATE permissions SET \
                permission_name = COALESCE($2, permission_name), \
                description = COALESCE($3, description), \
                is_active = COALESCE($4, is_active), \
                module_id = COALESCE($5, module_id), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&input.permission_name)
        .bind(&input.description)
        .bind(input.is_active)
        .bind(input.module_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update permission", e))
    }

    async fn delete(&self, id: PermissionId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete permission", e))?;
        Ok(result.rows_affected() > 0)
    }
}
