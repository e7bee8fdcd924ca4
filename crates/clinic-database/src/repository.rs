//! Repository traits and the provider-selected bundle of implementations.
//!
//! Every trait is object safe and implemented twice: once over a PostgreSQL
//! pool ([`crate::postgres`]) and once over seeded in-process tables
//! ([`crate::memory`]). Callers only ever see `Arc<dyn ...>`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use clinic_core::config::{DatabaseConfig, DatabaseProvider};
use clinic_core::result::AppResult;
use clinic_core::types::{BranchId, CatalogFilter, ModuleId, PermissionId, RoleId, UserId};
use clinic_entity::branch::Branch;
use clinic_entity::rbac::{
    CreateModule, CreatePermission, CreateRole, EffectiveModule, EffectivePermission,
    GrantChange, Module, ModulePermissionStatus, Permission, Role, RoleModule, RoleModuleDetail,
    RolePermission, RolePermissionDetail, UpdateModule, UpdatePermission, UpdateRole,
};
use clinic_entity::user::{User, UserWithRole};

use crate::connection::DatabasePool;
use crate::memory::MemoryDatabase;
use crate::postgres::{
    PgBranchRepository, PgGrantRepository, PgModuleRepository, PgPermissionRepository,
    PgRoleRepository, PgUserRepository,
};

/// Read access to branches. Branch administration lives elsewhere.
#[async_trait]
pub trait BranchRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a branch by primary key.
    async fn find_by_id(&self, id: BranchId) -> AppResult<Option<Branch>>;
}

/// Read access to users and their roles.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user together with its role.
    async fn find_with_role(&self, id: UserId) -> AppResult<Option<UserWithRole>>;

    /// Number of users holding a role.
    async fn count_by_role(&self, role_id: RoleId) -> AppResult<u64>;
}

/// Role catalogue.
#[async_trait]
pub trait RoleRepository: Send + Sync + std::fmt::Debug + 'static {
    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    /// List roles ordered by name.
    async fn list(&self, filter: &CatalogFilter) -> AppResult<Vec<Role>>;

    /// Insert a role. Duplicate names fail with a conflict.
    async fn create(&self, input: CreateRole) -> AppResult<Role>;

    /// Apply a partial update. `None` when the role does not exist.
    async fn update(&self, id: RoleId, input: UpdateRole) -> AppResult<Option<Role>>;

    /// Delete a role and its grants. Returns `true` if a row was removed.
    async fn delete(&self, id: RoleId) -> AppResult<bool>;
}

/// Module catalogue.
#[async_trait]
pub trait ModuleRepository: Send + Sync + std::fmt::Debug + 'static {
    async fn find_by_id(&self, id: ModuleId) -> AppResult<Option<Module>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Module>>;

    /// List modules ordered by name.
    async fn list(&self, filter: &CatalogFilter) -> AppResult<Vec<Module>>;

    async fn create(&self, input: CreateModule) -> AppResult<Module>;

    async fn update(&self, id: ModuleId, input: UpdateModule) -> AppResult<Option<Module>>;

    async fn delete(&self, id: ModuleId) -> AppResult<bool>;
}

/// Permission catalogue.
#[async_trait]
pub trait PermissionRepository: Send + Sync + std::fmt::Debug + 'static {
    async fn find_by_id(&self, id: PermissionId) -> AppResult<Option<Permission>>;

    /// Find a permission by name within one module.
    async fn find_by_name_in_module(
        &self,
        name: &str,
        module_id: ModuleId,
    ) -> AppResult<Option<Permission>>;

    /// List permissions ordered by name, optionally restricted to a module.
    async fn list(
        &self,
        filter: &CatalogFilter,
        module_id: Option<ModuleId>,
    ) -> AppResult<Vec<Permission>>;

    /// Number of permissions owned by a module.
    async fn count_by_module(&self, module_id: ModuleId) -> AppResult<u64>;

    async fn create(&self, input: CreatePermission) -> AppResult<Permission>;

    async fn update(
        &self,
        id: PermissionId,
        input: UpdatePermission,
    ) -> AppResult<Option<Permission>>;

    async fn delete(&self, id: PermissionId) -> AppResult<bool>;
}

/// Role grants: the `role_permissions` and `role_modules` join relations.
///
/// Both relations hold at most one row per pair. Effective reads apply
/// [`clinic_entity::rbac::is_effective`] to the grant and the target.
#[async_trait]
pub trait GrantRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert or rewrite the grant row for the pair.
    async fn upsert_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
        is_enabled: bool,
    ) -> AppResult<(RolePermission, GrantChange)>;

    /// Delete the grant row. Returns `true` if a row was removed.
    async fn delete_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<bool>;

    /// Grant rows joined with both sides, for one role or for all roles.
    async fn role_permission_details(
        &self,
        role_id: Option<RoleId>,
    ) -> AppResult<Vec<RolePermissionDetail>>;

    /// Active permissions of a module with the role's standing on each.
    async fn module_permission_status(
        &self,
        role_id: RoleId,
        module_id: ModuleId,
    ) -> AppResult<Vec<ModulePermissionStatus>>;

    /// Permissions the role effectively holds.
    async fn effective_permissions(&self, role_id: RoleId) -> AppResult<Vec<EffectivePermission>>;

    async fn upsert_role_module(
        &self,
        role_id: RoleId,
        module_id: ModuleId,
        is_enabled: bool,
    ) -> AppResult<(RoleModule, GrantChange)>;

    async fn delete_role_module(&self, role_id: RoleId, module_id: ModuleId) -> AppResult<bool>;

    async fn role_module_details(&self, role_id: Option<RoleId>)
    -> AppResult<Vec<RoleModuleDetail>>;

    /// Modules the role effectively sees.
    async fn effective_modules(&self, role_id: RoleId) -> AppResult<Vec<EffectiveModule>>;
}

/// One handle per repository, all backed by the same provider.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub branches: Arc<dyn BranchRepository>,
    pub users: Arc<dyn UserRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub modules: Arc<dyn ModuleRepository>,
    pub permissions: Arc<dyn PermissionRepository>,
    pub grants: Arc<dyn GrantRepository>,
}

impl Repositories {
    /// Build the repositories for the configured provider.
    ///
    /// For PostgreSQL this opens the pool and, when enabled, applies the
    /// embedded migrations.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    pool.migrate().await?;
                }
                Ok(Self::postgres(pool))
            }
            DatabaseProvider::Memory => {
                info!("Using in-memory database with the base RBAC catalogue");
                Ok(Self::memory(MemoryDatabase::seeded()))
            }
        }
    }

    /// Repositories over a PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pool = pool.into_pool();
        Self {
            branches: Arc::new(PgBranchRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            roles: Arc::new(PgRoleRepository::new(pool.clone())),
            modules: Arc::new(PgModuleRepository::new(pool.clone())),
            permissions: Arc::new(PgPermissionRepository::new(pool.clone())),
            grants: Arc::new(PgGrantRepository::new(pool)),
        }
    }

    /// Repositories sharing one set of in-memory tables.
    pub fn memory(db: MemoryDatabase) -> Self {
        Self {
            branches: Arc::new(db.clone()),
            users: Arc::new(db.clone()),
            roles: Arc::new(db.clone()),
            modules: Arc::new(db.clone()),
            permissions: Arc::new(db.clone()),
            grants: Arc::new(db),
        }
    }
}
