//! In-memory persistence.
//!
//! All repositories share one set of tables behind a `tokio::sync::RwLock`.
//! Data lives as long as the process. Used by the `memory` provider and by
//! the test suites.

mod catalog;
mod directory;
mod grant;
mod tables;

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use clinic_core::types::{BranchId, RoleId, UserId};
use clinic_entity::branch::Branch;
use clinic_entity::user::User;

use self::tables::Tables;

/// Shared in-process tables implementing every repository trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    /// Empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables holding the base RBAC catalogue from [`crate::seed`].
    pub fn seeded() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::seeded())),
        }
    }

    /// Insert a branch and return it.
    pub async fn insert_branch(&self, name: &str, is_active: bool) -> Branch {
        let now = Utc::now();
        let branch = Branch {
            id: BranchId::new(),
            name: name.to_string(),
            is_active,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .branches
            .insert(branch.id, branch.clone());
        branch
    }

    /// Insert a user and return it.
    pub async fn insert_user(
        &self,
        email: &str,
        role_id: Option<RoleId>,
        branch_id: Option<BranchId>,
    ) -> User {
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: email.to_string(),
            full_name: email.split('@').next().unwrap_or(email).to_string(),
            role_id,
            branch_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.users.insert(user.id, user.clone());
        user
    }

    /// Flip a branch's active flag. Returns `false` if the branch is unknown.
    pub async fn set_branch_active(&self, id: BranchId, is_active: bool) -> bool {
        let mut tables = self.tables.write().await;
        match tables.branches.get_mut(&id) {
            Some(branch) => {
                branch.is_active = is_active;
                branch.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}
