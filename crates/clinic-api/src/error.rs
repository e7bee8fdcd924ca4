//! Maps domain `AppError` to the HTTP error envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use clinic_core::error::{AppError, ErrorKind};
use clinic_core::messages::{LocalizedMessage, MessageKey};

/// An [`AppError`] on its way out of a handler or middleware.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body shared by every failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// HTTP status code, repeated for clients that only read the body.
    pub status_code: u16,
    /// Error category, e.g. `VALIDATION`.
    pub code: String,
    /// Catalogue key, e.g. `BRANCH.INVALID_UUID`.
    pub message_key: MessageKey,
    /// Client-facing text.
    pub message: LocalizedMessage,
    /// Developer-facing detail.
    pub error: String,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        let detail = if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err.message, source = ?err.source, "Internal server error");
            "Internal server error".to_string()
        } else {
            err.message.clone()
        };

        let key = err.message_key();
        let body = ApiErrorResponse {
            success: false,
            status_code: status.as_u16(),
            code: err.kind.to_string(),
            message_key: key,
            message: key.localized(),
            error: detail,
        };

        (status, Json(body)).into_response()
    }
}
