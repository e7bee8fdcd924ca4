//! Read-side projections over roles and their grants.

use chrono::{DateTime, Utc};
use clinic_core::types::{ModuleId, PermissionId, RoleId, UserId};
use serde::Serialize;
use sqlx::FromRow;

use super::{Module, Role};

/// A permission the role effectively holds, with its owning module.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EffectivePermission {
    pub id: PermissionId,
    pub permission_name: String,
    pub description: Option<String>,
    pub module_id: ModuleId,
    pub module_name: String,
}

/// A module the role effectively sees.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveModule {
    pub id: ModuleId,
    pub module_name: String,
    pub description: Option<String>,
}

/// A role-permission grant joined with both sides.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissionDetail {
    pub role_id: RoleId,
    pub role_name: String,
    pub permission_id: PermissionId,
    pub permission_name: String,
    pub permission_description: Option<String>,
    pub permission_is_active: bool,
    pub module_id: ModuleId,
    pub module_name: String,
    pub is_enabled: bool,
    /// `is_enabled && permission_is_active`.
    pub is_effective: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A role-module grant joined with both sides.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoleModuleDetail {
    pub role_id: RoleId,
    pub role_name: String,
    pub module_id: ModuleId,
    pub module_name: String,
    pub module_description: Option<String>,
    pub module_is_active: bool,
    pub is_enabled: bool,
    /// `is_enabled && module_is_active`.
    pub is_effective: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An active permission of a module and its standing for one role.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ModulePermissionStatus {
    pub id: PermissionId,
    pub permission_name: String,
    pub description: Option<String>,
    /// A grant row exists for the role.
    pub is_assigned: bool,
    /// The grant row exists and is enabled.
    pub is_active_for_role: bool,
}

/// All active permissions of a module as seen by one role.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleModulePermissions {
    pub role: Role,
    pub module: Module,
    pub permissions: Vec<ModulePermissionStatus>,
}

/// Everything a user is effectively allowed to do and see.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissions {
    pub user_id: UserId,
    pub role_id: Option<RoleId>,
    pub role_name: Option<String>,
    pub permissions: Vec<EffectivePermission>,
    pub modules: Vec<EffectiveModule>,
}

impl UserPermissions {
    /// The empty projection returned for users without a role.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            role_id: None,
            role_name: None,
            permissions: Vec::new(),
            modules: Vec::new(),
        }
    }

    /// Whether the projection grants the named permission.
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p.permission_name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_projection_serializes_empty_lists() {
        let projection = UserPermissions::empty(UserId::new());
        let json = serde_json::to_value(&projection).expect("serialize");
        assert_eq!(json["permissions"], serde_json::json!([]));
        assert_eq!(json["modules"], serde_json::json!([]));
        assert!(json["roleName"].is_null());
        assert!(!projection.has_permission("READ_PATIENT"));
    }
}
