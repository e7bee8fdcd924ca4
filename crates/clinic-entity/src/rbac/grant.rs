//! Role grant join rows.
//!
//! A grant row carries its own `is_enabled` flag. The referenced permission
//! or module carries an independent `is_active` flag. Only the conjunction
//! of both makes a grant effective.

use chrono::{DateTime, Utc};
use clinic_core::types::{ModuleId, PermissionId, RoleId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Grant of a permission to a role. Keyed by `(role_id, permission_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RolePermission {
    pub role_id: RoleId,
    pub permission_id: PermissionId,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Grant of a module to a role. Keyed by `(role_id, module_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoleModule {
    pub role_id: RoleId,
    pub module_id: ModuleId,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whether an upsert inserted a new grant row or rewrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantChange {
    Created,
    Updated,
}

/// The effectiveness rule shared by every read path and by authorization.
pub fn is_effective(grant_enabled: bool, target_active: bool) -> bool {
    grant_enabled && target_active
}
