//! Route access policies.
//!
//! A policy is plain data attached to a route when the router is built.
//! Both lists use OR semantics internally; when both are non-empty the
//! caller must satisfy each of them.

/// Required permissions and roles for one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessPolicy {
    /// Any one of these permission names suffices. Empty means no requirement.
    pub permissions: &'static [&'static str],
    /// Any one of these role names suffices. Empty means no requirement.
    pub roles: &'static [&'static str],
    /// The caller must hold the configured admin role (`branch.admin_role_name`).
    pub admin_only: bool,
}

impl AccessPolicy {
    /// Only a verified identity is required.
    pub const AUTHENTICATED: Self = Self {
        permissions: &[],
        roles: &[],
        admin_only: false,
    };

    /// Only the configured admin role passes.
    pub const ADMIN: Self = Self {
        permissions: &[],
        roles: &[],
        admin_only: true,
    };

    /// Require one of the given permissions.
    pub const fn permissions(permissions: &'static [&'static str]) -> Self {
        Self {
            permissions,
            roles: &[],
            admin_only: false,
        }
    }

    /// Require one of the given roles.
    pub const fn roles(roles: &'static [&'static str]) -> Self {
        Self {
            permissions: &[],
            roles,
            admin_only: false,
        }
    }

    /// Add a role requirement to a permission policy.
    pub const fn with_roles(self, roles: &'static [&'static str]) -> Self {
        Self {
            permissions: self.permissions,
            roles,
            admin_only: self.admin_only,
        }
    }
}
