//! Permission entity model.

use chrono::{DateTime, Utc};
use clinic_core::types::{ModuleId, PermissionId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named capability such as `READ_PATIENT`, owned by one module.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Unique permission identifier.
    pub id: PermissionId,
    /// Name, unique within the owning module.
    pub permission_name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Global active flag, independent of per-role grants.
    pub is_active: bool,
    /// Owning module.
    pub module_id: ModuleId,
    /// When the permission was created.
    pub created_at: DateTime<Utc>,
    /// When the permission was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a permission.
#[derive(Debug, Clone)]
pub struct CreatePermission {
    pub permission_name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub module_id: ModuleId,
}

/// Partial update of a permission.
#[derive(Debug, Clone, Default)]
pub struct UpdatePermission {
    pub permission_name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub module_id: Option<ModuleId>,
}
