//! Branch repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use clinic_core::result::AppResult;
use clinic_core::types::BranchId;
use clinic_entity::branch::Branch;

use super::db_error;
use crate::repository::BranchRepository;

/// Branch lookups over PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgBranchRepository {
    pool: PgPool,
}

impl PgBranchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BranchRepository for PgBranchRepository {
    async fn find_by_id(&self, id: BranchId) -> AppResult<Option<Branch>> {
        sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find branch by id", e))
    }
}
