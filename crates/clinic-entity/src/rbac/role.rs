//! Role entity model.

use chrono::{DateTime, Utc};
use clinic_core::types::RoleId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named bundle of permission and module grants.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Unique role identifier.
    pub id: RoleId,
    /// Unique role name. `"Admin"` is privileged.
    pub role_name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Active flag.
    pub is_active: bool,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a role.
#[derive(Debug, Clone)]
pub struct CreateRole {
    pub role_name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Partial update of a role. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateRole {
    pub role_name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
