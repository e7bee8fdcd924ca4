//! Module entity model.

use chrono::{DateTime, Utc};
use clinic_core::types::ModuleId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A functional area of the application (USERS, PATIENTS, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Unique module identifier.
    pub id: ModuleId,
    /// Unique module name.
    pub module_name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Global active flag, independent of per-role grants.
    pub is_active: bool,
    /// When the module was created.
    pub created_at: DateTime<Utc>,
    /// When the module was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a module.
#[derive(Debug, Clone)]
pub struct CreateModule {
    pub module_name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Partial update of a module.
#[derive(Debug, Clone, Default)]
pub struct UpdateModule {
    pub module_name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
