//! Table storage and seeding for the in-memory database.

use std::collections::HashMap;

use chrono::Utc;

use clinic_core::types::{BranchId, ModuleId, PermissionId, RoleId, UserId};
use clinic_entity::branch::Branch;
use clinic_entity::rbac::{Module, Permission, Role, RoleModule, RolePermission};
use clinic_entity::user::User;

use crate::seed;

#[derive(Debug, Default)]
pub(super) struct Tables {
    pub branches: HashMap<BranchId, Branch>,
    pub users: HashMap<UserId, User>,
    pub roles: HashMap<RoleId, Role>,
    pub modules: HashMap<ModuleId, Module>,
    pub permissions: HashMap<PermissionId, Permission>,
    pub role_permissions: HashMap<(RoleId, PermissionId), RolePermission>,
    pub role_modules: HashMap<(RoleId, ModuleId), RoleModule>,
}

impl Tables {
    /// Build tables holding the base catalogue, Admin granted everything.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut tables = Self::default();

        let mut admin_id = None;
        for (name, description) in seed::ROLES {
            let role = Role {
                id: RoleId::new(),
                role_name: (*name).to_string(),
                description: Some((*description).to_string()),
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            if *name == seed::ADMIN_ROLE {
                admin_id = Some(role.id);
            }
            tables.roles.insert(role.id, role);
        }

        for seeded in seed::MODULES {
            let module = Module {
                id: ModuleId::new(),
                module_name: seeded.name.to_string(),
                description: Some(seeded.description.to_string()),
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            for (name, description) in seeded.permissions {
                let permission = Permission {
                    id: PermissionId::new(),
                    permission_name: (*name).to_string(),
                    description: Some((*description).to_string()),
                    is_active: true,
                    module_id: module.id,
                    created_at: now,
                    updated_at: now,
                };
                tables.permissions.insert(permission.id, permission);
            }
            tables.modules.insert(module.id, module);
        }

        if let Some(role_id) = admin_id {
            for permission_id in tables.permissions.keys().copied().collect::<Vec<_>>() {
                tables.role_permissions.insert(
                    (role_id, permission_id),
                    RolePermission {
                        role_id,
                        permission_id,
                        is_enabled: true,
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
            for module_id in tables.modules.keys().copied().collect::<Vec<_>>() {
                tables.role_modules.insert(
                    (role_id, module_id),
                    RoleModule {
                        role_id,
                        module_id,
                        is_enabled: true,
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }

        tables
    }
}
