//! Branch entity model.

use chrono::{DateTime, Utc};
use clinic_core::types::BranchId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A clinic location. Business data is partitioned by branch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Unique branch identifier.
    pub id: BranchId,
    /// Display name.
    pub name: String,
    /// Inactive branches cannot be selected by any request.
    pub is_active: bool,
    /// When the branch was created.
    pub created_at: DateTime<Utc>,
    /// When the branch was last updated.
    pub updated_at: DateTime<Utc>,
}
