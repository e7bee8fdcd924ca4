//! Health check handler.

use clinic_core::messages::MessageKey;

use crate::dto::ApiResponse;
use crate::dto::response::HealthResponse;

/// GET /health
pub async fn health() -> ApiResponse<HealthResponse> {
    ApiResponse::ok(
        MessageKey::Success,
        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}
