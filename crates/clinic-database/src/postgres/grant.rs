//! Role grant repository implementation.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Row};

use clinic_core::result::AppResult;
use clinic_core::types::{ModuleId, PermissionId, RoleId};
use clinic_entity::rbac::{
    EffectiveModule, EffectivePermission, GrantChange, ModulePermissionStatus, RoleModule,
    RoleModuleDetail, RolePermission, RolePermissionDetail,
};

use super::db_error;
use crate::repository::GrantRepository;

/// `xmax = 0` holds only for a row version created by this statement's insert.
const UPSERT_ROLE_PERMISSION: &str = "\
    INSERT INTO role_permissions (role_id, permission_id, is_enabled) \
    VALUES ($1, $2, $3) \
    ON CONFLICT (role_id, permission_id) \
    DO UPDATE SET is_enabled = EXCLUDED.is_enabled, updated_at = NOW() \
    RETURNING *, (xmax = 0) AS inserted";

const UPSERT_ROLE_MODULE: &str = "\
    INSERT INTO role_modules (role_id, module_id, is_enabled) \
    VALUES ($1, $2, $3) \
    ON CONFLICT (role_id, module_id) \
    DO UPDATE SET is_enabled = EXCLUDED.is_enabled, updated_at = NOW() \
    RETURNING *, (xmax = 0) AS inserted";

const ROLE_PERMISSION_DETAILS: &str = "\
    SELECT rp.role_id, r.role_name, \
           rp.permission_id, p.permission_name, p.description AS permission_description, \
           p.is_active AS permission_is_active, \
           p.module_id, m.module_name, \
           rp.is_enabled, (rp.is_enabled AND p.is_active) AS is_effective, \
           rp.created_at, rp.updated_at \
    FROM role_permissions rp \
    JOIN roles r ON r.id = rp.role_id \
    JOIN permissions p ON p.id = rp.permission_id \
    JOIN modules m ON m.id = p.module_id \
    WHERE ($1::uuid IS NULL OR rp.role_id = $1) \
    ORDER BY r.role_name, m.module_name, p.permission_name";

const ROLE_MODULE_DETAILS: &str = "\
    SELECT rm.role_id, r.role_name, \
           rm.module_id, m.module_name, m.description AS module_description, \
           m.is_active AS module_is_active, \
           rm.is_enabled, (rm.is_enabled AND m.is_active) AS is_effective, \
           rm.created_at, rm.updated_at \
    FROM role_modules rm \
    JOIN roles r ON r.id = rm.role_id \
    JOIN modules m ON m.id = rm.module_id \
    WHERE ($1::uuid IS NULL OR rm.role_id = $1) \
    ORDER BY r.role_name, m.module_name";

/// Grant storage over PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgGrantRepository {
    pool: PgPool,
}

impl PgGrantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn change_from(inserted: bool) -> GrantChange {
    if inserted {
        GrantChange::Created
    } else {
        GrantChange::Updated
    }
}

#[async_trait]
impl GrantRepository for PgGrantRepository {
    async fn upsert_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
        is_enabled: bool,
    ) -> AppResult<(RolePermission, GrantChange)> {
        let row = sqlx::query(UPSERT_ROLE_PERMISSION)
            .bind(role_id)
            .bind(permission_id)
            .bind(is_enabled)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to upsert role permission", e))?;

        let grant = RolePermission::from_row(&row)
            .map_err(|e| db_error("Failed to decode role permission", e))?;
        let inserted: bool = row
            .try_get("inserted")
            .map_err(|e| db_error("Failed to decode upsert outcome", e))?;
        Ok((grant, change_from(inserted)))
    }

    async fn delete_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM role_permissions WHERE role_id = $1 AND permission_id = $2")
                .bind(role_id)
                .bind(permission_id)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to delete role permission", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn role_permission_details(
        &self,
        role_id: Option<RoleId>,
    ) -> AppResult<Vec<RolePermissionDetail>> {
        sqlx::query_as::<_, RolePermissionDetail>(ROLE_PERMISSION_DETAILS)
            .bind(role_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list role permissions", e))
    }

    async fn module_permission_status(
        &self,
        role_id: RoleId,
        module_id: ModuleId,
    ) -> AppResult<Vec<ModulePermissionStatus>> {
        sqlx::query_as::<_, ModulePermissionStatus>(
            "SELECT p.id, p.permission_name, p.description, \
                    (rp.role_id IS NOT NULL) AS is_assigned, \
                    COALESCE(rp.is_enabled, FALSE) AS is_active_for_role \
             FROM permissions p \
             LEFT JOIN role_permissions rp \
                    ON rp.permission_id = p.id AND rp.role_id = $1 \
             WHERE p.module_id = $2 AND p.is_active \
             ORDER BY p.permission_name",
        )
        .bind(role_id)
        .bind(module_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list module permissions for role", e))
    }

    async fn effective_permissions(&self, role_id: RoleId) -> AppResult<Vec<EffectivePermission>> {
        sqlx::query_as::<_, EffectivePermission>(
            "SELECT p.id, p.permission_name, p.description, p.module_id, m.module_name \
             FROM role_permissions rp \
             JOIN permissions p ON p.id = rp.permission_id \
             JOIN modules m ON m.id = p.module_id \
             WHERE rp.role_id = $1 AND rp.is_enabled AND p.is_active \
             ORDER BY m.module_name, p.permission_name",
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load effective permissions", e))
    }

    async fn upsert_role_module(
        &self,
        role_id: RoleId,
        module_id: ModuleId,
        is_enabled: bool,
    ) -> AppResult<(RoleModule, GrantChange)> {
        let row = sqlx::query(UPSERT_ROLE_MODULE)
            .bind(role_id)
            .bind(module_id)
            .bind(is_enabled)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to upsert role module", e))?;

        let grant = RoleModule::from_row(&row)
            .map_err(|e| db_error("Failed to decode role module", e))?;
        let inserted: bool = row
            .try_get("inserted")
            .map_err(|e| db_error("Failed to decode upsert outcome", e))?;
        Ok((grant, change_from(inserted)))
    }

    async fn delete_role_module(&self, role_id: RoleId, module_id: ModuleId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM role_modules WHERE role_id = $1 AND module_id = $2")
            .bind(role_id)
            .bind(module_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete role module", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn role_module_details(
        &self,
        role_id: Option<RoleId>,
    ) -> AppResult<Vec<RoleModuleDetail>> {
        sqlx::query_as::<_, RoleModuleDetail>(ROLE_MODULE_DETAILS)
            .bind(role_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list role modules", e))
    }

    async fn effective_modules(&self, role_id: RoleId) -> AppResult<Vec<EffectiveModule>> {
        sqlx::query_as::<_, EffectiveModule>(
            "SELECT m.id, m.module_name, m.description \
             FROM role_modules rm \
             JOIN modules m ON m.id = rm.module_id \
             WHERE rm.role_id = $1 AND rm.is_enabled AND m.is_active \
             ORDER BY m.module_name",
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load effective modules", e))
    }
}
