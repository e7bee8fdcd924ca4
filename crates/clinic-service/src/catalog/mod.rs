//! Role, module, and permission catalogue management.

pub mod module;
pub mod permission;
pub mod role;

pub use module::ModuleService;
pub use permission::PermissionService;
pub use role::RoleService;

use clinic_core::error::{AppError, ErrorKind};
use clinic_core::messages::MessageKey;
use clinic_core::result::AppResult;

/// Trim a required name, rejecting blanks.
pub(crate) fn required_name(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Give storage-level conflicts (unique index races) the catalogue key.
pub(crate) fn keyed_conflict(err: AppError, key: MessageKey) -> AppError {
    if err.kind == ErrorKind::Conflict && err.key.is_none() {
        err.with_key(key)
    } else {
        err
    }
}
