//! Branch and user lookups.

use async_trait::async_trait;

use clinic_core::result::AppResult;
use clinic_core::types::{BranchId, RoleId, UserId};
use clinic_entity::branch::Branch;
use clinic_entity::user::{User, UserWithRole};

use super::MemoryDatabase;
use crate::repository::{BranchRepository, UserRepository};

#[async_trait]
impl BranchRepository for MemoryDatabase {
    async fn find_by_id(&self, id: BranchId) -> AppResult<Option<Branch>> {
        Ok(self.tables.read().await.branches.get(&id).cloned())
    }
}

#[async_trait]
impl UserRepository for MemoryDatabase {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_with_role(&self, id: UserId) -> AppResult<Option<UserWithRole>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).map(|user| UserWithRole {
            user: user.clone(),
            role: user.role_id.and_then(|r| tables.roles.get(&r).cloned()),
        }))
    }

    async fn count_by_role(&self, role_id: RoleId) -> AppResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter(|u| u.role_id == Some(role_id))
            .count() as u64)
    }
}
