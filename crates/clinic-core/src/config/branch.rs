//! Branch resolution configuration.

use serde::{Deserialize, Serialize};

/// Settings for the per-request branch resolution step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchConfig {
    /// First path segments (after the API prefix) that skip resolution.
    #[serde(default = "default_excluded_routes")]
    pub excluded_routes: Vec<String>,
    /// Role name allowed to override its branch.
    #[serde(default = "default_admin_role_name")]
    pub admin_role_name: String,
    /// Header carrying the admin override.
    #[serde(default = "default_admin_header")]
    pub admin_header: String,
    /// Header carrying the client-supplied branch.
    #[serde(default = "default_branch_header")]
    pub branch_header: String,
    /// Accept the client-supplied branch header when no user branch is known,
    /// including for requests without a usable token.
    #[serde(default = "default_true")]
    pub allow_anonymous_fallback: bool,
}

impl BranchConfig {
    /// Whether a first path segment bypasses resolution.
    pub fn is_excluded(&self, segment: &str) -> bool {
        self.excluded_routes.iter().any(|r| r == segment)
    }
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            excluded_routes: default_excluded_routes(),
            admin_role_name: default_admin_role_name(),
            admin_header: default_admin_header(),
            branch_header: default_branch_header(),
            allow_anonymous_fallback: true,
        }
    }
}

fn default_excluded_routes() -> Vec<String> {
    ["auth", "roles", "permission", "module", "files", "branches"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_admin_role_name() -> String {
    "Admin".to_string()
}

fn default_admin_header() -> String {
    "x-admin-branch-id".to_string()
}

fn default_branch_header() -> String {
    "x-branch-id".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_segments() {
        let config = BranchConfig::default();
        for segment in ["auth", "roles", "permission", "module", "files", "branches"] {
            assert!(config.is_excluded(segment), "{segment} should be excluded");
        }
        assert!(!config.is_excluded("patients"));
        assert!(!config.is_excluded("role-permissions"));
        assert!(!config.is_excluded(""));
    }
}
