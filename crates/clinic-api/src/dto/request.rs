//! Request DTOs with validation.

use serde::Deserialize;
use validator::Validate;

use clinic_core::types::{ModuleId, PermissionId, RoleId};
use clinic_entity::rbac::{
    CreateModule, CreatePermission, CreateRole, UpdateModule, UpdatePermission, UpdateRole,
};

fn default_true() -> bool {
    true
}

/// Grant (or re-flag) a permission for a role.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignRolePermissionRequest {
    pub role_id: RoleId,
    pub permission_id: PermissionId,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
}

/// Grant (or re-flag) a module for a role.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleModuleRequest {
    pub role_id: RoleId,
    pub module_id: ModuleId,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
}

/// Select the branch an admin filters by.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetAdminBranchFilterRequest {
    #[validate(length(min = 1, message = "branchId is required"))]
    pub branch_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    #[validate(length(min = 2, max = 100))]
    pub role_name: String,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<CreateRoleRequest> for CreateRole {
    fn from(req: CreateRoleRequest) -> Self {
        Self {
            role_name: req.role_name,
            description: req.description,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    #[validate(length(min = 2, max = 100))]
    pub role_name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateRoleRequest> for UpdateRole {
    fn from(req: UpdateRoleRequest) -> Self {
        Self {
            role_name: req.role_name,
            description: req.description,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleRequest {
    #[validate(length(min = 2, max = 100))]
    pub module_name: String,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<CreateModuleRequest> for CreateModule {
    fn from(req: CreateModuleRequest) -> Self {
        Self {
            module_name: req.module_name,
            description: req.description,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModuleRequest {
    #[validate(length(min = 2, max = 100))]
    pub module_name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateModuleRequest> for UpdateModule {
    fn from(req: UpdateModuleRequest) -> Self {
        Self {
            module_name: req.module_name,
            description: req.description,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePermissionRequest {
    #[validate(length(min = 2, max = 100))]
    pub permission_name: String,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub module_id: ModuleId,
}

impl From<CreatePermissionRequest> for CreatePermission {
    fn from(req: CreatePermissionRequest) -> Self {
        Self {
            permission_name: req.permission_name,
            description: req.description,
            is_active: req.is_active,
            module_id: req.module_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePermissionRequest {
    #[validate(length(min = 2, max = 100))]
    pub permission_name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub module_id: Option<ModuleId>,
}

impl From<UpdatePermissionRequest> for UpdatePermission {
    fn from(req: UpdatePermissionRequest) -> Self {
        Self {
            permission_name: req.permission_name,
            description: req.description,
            is_active: req.is_active,
            module_id: req.module_id,
        }
    }
}

/// Query string for permission listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionQuery {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub module_id: Option<ModuleId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_request_defaults_to_enabled() {
        let req: AssignRolePermissionRequest = serde_json::from_value(serde_json::json!({
            "roleId": "6f1c2f5e-6b7a-4f0e-9c55-0b2f7c7a1e01",
            "permissionId": "0d3e3c1a-1f7d-4a77-8a0e-5c1c9b2d4e02"
        }))
        .expect("deserialize");
        assert!(req.is_enabled);
    }

    #[test]
    fn test_short_role_name_fails_validation() {
        let req = CreateRoleRequest {
            role_name: "A".to_string(),
            description: None,
            is_active: true,
        };
        assert!(req.validate().is_err());
    }
}
