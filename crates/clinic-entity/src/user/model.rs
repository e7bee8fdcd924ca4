//! User entity model.

use chrono::{DateTime, Utc};
use clinic_core::types::{BranchId, RoleId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::rbac::Role;

/// A staff account. Credentials live with the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login e-mail.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Assigned role, if any.
    pub role_id: Option<RoleId>,
    /// Home branch, if any.
    pub branch_id: Option<BranchId>,
    /// Account enabled flag.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A user loaded together with its role.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithRole {
    /// The user row.
    #[serde(flatten)]
    pub user: User,
    /// The referenced role, `None` when unassigned or dangling.
    pub role: Option<Role>,
}

impl UserWithRole {
    /// Name of the user's role.
    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref().map(|r| r.role_name.as_str())
    }

    /// Whether the user's role carries the given name.
    pub fn has_role(&self, name: &str) -> bool {
        self.role_name() == Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<Role>) -> UserWithRole {
        let now = Utc::now();
        UserWithRole {
            user: User {
                id: UserId::new(),
                email: "ana@clinic.test".to_string(),
                full_name: "Ana".to_string(),
                role_id: role.as_ref().map(|r| r.id),
                branch_id: None,
                is_active: true,
                created_at: now,
                updated_at: now,
            },
            role,
        }
    }

    #[test]
    fn test_has_role_is_exact() {
        let now = Utc::now();
        let role = Role {
            id: RoleId::new(),
            role_name: "Admin".to_string(),
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let u = user(Some(role));
        assert!(u.has_role("Admin"));
        assert!(!u.has_role("admin"));
    }

    #[test]
    fn test_roleless_user_has_no_role() {
        let u = user(None);
        assert_eq!(u.role_name(), None);
        assert!(!u.has_role("Admin"));
    }
}
