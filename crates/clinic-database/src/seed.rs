//! Base RBAC catalogue.
//!
//! The SQL seed migration inserts the same names; the in-memory database
//! builds its tables from these constants.

/// Name of the privileged role. It is granted every seeded permission and module.
pub const ADMIN_ROLE: &str = "Admin";

/// Seeded roles and their descriptions.
pub const ROLES: &[(&str, &str)] = &[
    (ADMIN_ROLE, "Full access to every module and branch"),
    ("Doctor", "Clinical staff"),
    ("Nurse", "Nursing staff"),
    ("Receptionist", "Front desk and scheduling"),
    ("User", "Basic account"),
];

/// A seeded module with the permissions it owns.
#[derive(Debug, Clone, Copy)]
pub struct SeedModule {
    pub name: &'static str,
    pub description: &'static str,
    pub permissions: &'static [(&'static str, &'static str)],
}

/// Seeded modules.
pub const MODULES: &[SeedModule] = &[
    SeedModule {
        name: "USERS",
        description: "User management",
        permissions: &[
            ("CREATE_USER", "Create users"),
            ("READ_USER", "Read users"),
            ("UPDATE_USER", "Update users"),
            ("DELETE_USER", "Delete users"),
        ],
    },
    SeedModule {
        name: "ROLES",
        description: "Role management",
        permissions: &[
            ("CREATE_ROLE", "Create roles"),
            ("READ_ROLE", "Read roles"),
            ("UPDATE_ROLE", "Update roles"),
            ("DELETE_ROLE", "Delete roles"),
            ("ASSIGN_ROLE_PERMISSION", "Assign permissions to roles"),
            ("REMOVE_ROLE_PERMISSION", "Remove permissions from roles"),
            ("READ_ROLE_PERMISSION", "Read role permissions"),
            ("ASSIGN_ROLE_MODULE", "Assign modules to roles"),
            ("REMOVE_ROLE_MODULE", "Remove modules from roles"),
            ("READ_ROLE_MODULE", "Read role modules"),
        ],
    },
    SeedModule {
        name: "MODULES",
        description: "Module management",
        permissions: &[
            ("CREATE_MODULE", "Create modules"),
            ("READ_MODULE", "Read modules"),
            ("UPDATE_MODULE", "Update modules"),
            ("DELETE_MODULE", "Delete modules"),
        ],
    },
    SeedModule {
        name: "PERMISSIONS",
        description: "Permission management",
        permissions: &[
            ("CREATE_PERMISSION", "Create permissions"),
            ("READ_PERMISSION", "Read permissions"),
            ("UPDATE_PERMISSION", "Update permissions"),
            ("DELETE_PERMISSION", "Delete permissions"),
        ],
    },
    SeedModule {
        name: "DASHBOARD",
        description: "Dashboard",
        permissions: &[("VIEW_DASHBOARD", "View the dashboard")],
    },
    SeedModule {
        name: "PATIENTS",
        description: "Patient records",
        permissions: &[
            ("CREATE_PATIENT", "Create patients"),
            ("READ_PATIENT", "Read patients"),
            ("UPDATE_PATIENT", "Update patients"),
            ("DELETE_PATIENT", "Delete patients"),
        ],
    },
    SeedModule {
        name: "APPOINTMENTS",
        description: "Appointment scheduling",
        permissions: &[
            ("CREATE_APPOINTMENT", "Create appointments"),
            ("READ_APPOINTMENT", "Read appointments"),
            ("UPDATE_APPOINTMENT", "Update appointments"),
            ("DELETE_APPOINTMENT", "Delete appointments"),
        ],
    },
    SeedModule {
        name: "REPORTS",
        description: "Reports",
        permissions: &[
            ("VIEW_REPORTS", "View reports"),
            ("EXPORT_REPORTS", "Export reports"),
        ],
    },
];

/// Total number of seeded permissions.
pub fn permission_count() -> usize {
    MODULES.iter().map(|m| m.permissions.len()).sum()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_permission_names_are_globally_unique() {
        let mut seen = HashSet::new();
        for module in MODULES {
            for (name, _) in module.permissions {
                assert!(seen.insert(*name), "duplicate permission {name}");
            }
        }
        assert_eq!(seen.len(), permission_count());
    }

    #[test]
    fn test_admin_role_is_seeded() {
        assert!(ROLES.iter().any(|(name, _)| *name == ADMIN_ROLE));
    }
}
