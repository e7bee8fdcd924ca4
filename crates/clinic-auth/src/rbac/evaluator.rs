//! Permission and role evaluation for the current user.

use std::sync::Arc;

use tracing::debug;

use clinic_core::error::AppError;
use clinic_core::messages::MessageKey;
use clinic_core::result::AppResult;
use clinic_database::GrantRepository;
use clinic_entity::user::UserWithRole;

use super::policy::AccessPolicy;

/// Checks a user's effective permissions against a required list.
///
/// Effective permissions come from the same repository read the
/// projection endpoints use, so authorization and reporting agree.
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    grants: Arc<dyn GrantRepository>,
}

impl PermissionEvaluator {
    pub fn new(grants: Arc<dyn GrantRepository>) -> Self {
        Self { grants }
    }

    /// `true` when `required` is empty or the user's role effectively holds
    /// at least one of the named permissions.
    pub async fn allows(&self, user: Option<&UserWithRole>, required: &[&str]) -> AppResult<bool> {
        if required.is_empty() {
            return Ok(true);
        }
        let Some(role) = user.and_then(|u| u.role.as_ref()) else {
            return Ok(false);
        };

        let effective = self.grants.effective_permissions(role.id).await?;
        Ok(effective
            .iter()
            .any(|p| required.contains(&p.permission_name.as_str())))
    }
}

/// Checks a user's role name against a required list.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleEvaluator;

impl RoleEvaluator {
    /// `true` when `required` is empty or the user's role name is listed.
    pub fn allows(&self, user: Option<&UserWithRole>, required: &[&str]) -> bool {
        if required.is_empty() {
            return true;
        }
        user.and_then(|u| u.role_name())
            .is_some_and(|name| required.contains(&name))
    }
}

/// Applies an [`AccessPolicy`] to an authenticated user.
#[derive(Debug, Clone)]
pub struct Authorizer {
    permissions: PermissionEvaluator,
    roles: RoleEvaluator,
    admin_role_name: String,
}

impl Authorizer {
    /// `admin_role_name` must be the same name branch resolution treats as admin.
    pub fn new(permissions: PermissionEvaluator, admin_role_name: impl Into<String>) -> Self {
        Self {
            permissions,
            roles: RoleEvaluator,
            admin_role_name: admin_role_name.into(),
        }
    }

    /// Fail with an authorization error unless the user satisfies the policy.
    pub async fn authorize(&self, user: &UserWithRole, policy: &AccessPolicy) -> AppResult<()> {
        if policy.admin_only && !user.has_role(&self.admin_role_name) {
            debug!(user_id = %user.user.id, admin_role = %self.admin_role_name, "Admin role required");
            return Err(forbidden(user, "role"));
        }
        if !self.roles.allows(Some(user), policy.roles) {
            debug!(user_id = %user.user.id, roles = ?policy.roles, "Role requirement not met");
            return Err(forbidden(user, "role"));
        }
        if !self.permissions.allows(Some(user), policy.permissions).await? {
            debug!(
                user_id = %user.user.id,
                permissions = ?policy.permissions,
                "Permission requirement not met"
            );
            return Err(forbidden(user, "permission"));
        }
        Ok(())
    }
}

fn forbidden(user: &UserWithRole, what: &str) -> AppError {
    AppError::authorization(format!(
        "User {} with role {:?} lacks the required {what}",
        user.user.id,
        user.role_name()
    ))
    .with_key(MessageKey::ErrorForbidden)
}
