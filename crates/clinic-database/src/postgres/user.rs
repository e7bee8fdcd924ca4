//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use clinic_core::result::AppResult;
use clinic_core::types::{RoleId, UserId};
use clinic_entity::rbac::Role;
use clinic_entity::user::{User, UserWithRole};

use super::db_error;
use crate::repository::UserRepository;

/// User lookups over PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user by id", e))
    }

    async fn find_with_role(&self, id: UserId) -> AppResult<Option<UserWithRole>> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let role = match user.role_id {
            Some(role_id) => sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
                .bind(role_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to load user role", e))?,
            None => None,
        };

        Ok(Some(UserWithRole { user, role }))
    }

    async fn count_by_role(&self, role_id: RoleId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role_id = $1")
            .bind(role_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count users by role", e))?;
        Ok(count as u64)
    }
}
