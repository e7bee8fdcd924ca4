//! Response DTOs.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use clinic_auth::BranchSource;
use clinic_core::messages::{LocalizedMessage, MessageKey};
use clinic_core::types::{BranchId, UserId};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    /// Always `true`.
    pub success: bool,
    /// Catalogue key describing the outcome.
    pub message_key: MessageKey,
    /// Client-facing text.
    pub message: LocalizedMessage,
    /// Response data.
    pub data: T,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// A `200 OK` response.
    pub fn ok(key: MessageKey, data: T) -> Self {
        Self {
            success: true,
            message_key: key,
            message: key.localized(),
            data,
            status: StatusCode::OK,
        }
    }

    /// A `201 Created` response.
    pub fn created(key: MessageKey, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(key, data)
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// The admin's current branch filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBranchFilterResponse {
    pub branch_id: Option<BranchId>,
}

/// Result of clearing every admin branch filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearedFiltersResponse {
    pub cleared: usize,
}

/// The branch resolved for the current request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchContextResponse {
    pub branch_id: BranchId,
    pub source: BranchSource,
    pub is_admin_filtering: bool,
    pub user_id: Option<UserId>,
}
