//! The client-facing projection of a user's effective grants.

use std::sync::Arc;

use tracing::{debug, warn};

use clinic_core::result::AppResult;
use clinic_core::types::UserId;
use clinic_database::{GrantRepository, UserRepository};
use clinic_entity::rbac::UserPermissions;
use clinic_entity::user::UserWithRole;

/// Computes what a user may do and see.
///
/// Reads go through the same [`GrantRepository::effective_permissions`]
/// query the permission evaluator uses, so the rendered capabilities never
/// diverge from what the server enforces.
#[derive(Debug, Clone)]
pub struct UserPermissionService {
    users: Arc<dyn UserRepository>,
    grants: Arc<dyn GrantRepository>,
}

impl UserPermissionService {
    pub fn new(users: Arc<dyn UserRepository>, grants: Arc<dyn GrantRepository>) -> Self {
        Self { users, grants }
    }

    /// Effective permissions and modules for a user id.
    ///
    /// Unknown users and users without a role get the empty projection.
    pub async fn user_permissions(&self, user_id: UserId) -> AppResult<UserPermissions> {
        match self.users.find_with_role(user_id).await? {
            Some(user) => self.project(&user).await,
            None => {
                warn!(%user_id, "Projecting permissions for unknown user");
                Ok(UserPermissions::empty(user_id))
            }
        }
    }

    /// Effective permissions and modules for an already loaded user.
    pub async fn project(&self, user: &UserWithRole) -> AppResult<UserPermissions> {
        let Some(role) = &user.role else {
            debug!(user_id = %user.user.id, "User has no role");
            return Ok(UserPermissions::empty(user.user.id));
        };

        let permissions = self.grants.effective_permissions(role.id).await?;
        let modules = self.grants.effective_modules(role.id).await?;

        Ok(UserPermissions {
            user_id: user.user.id,
            role_id: Some(role.id),
            role_name: Some(role.role_name.clone()),
            permissions,
            modules,
        })
    }
}
