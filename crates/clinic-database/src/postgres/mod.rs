//! PostgreSQL repository implementations.

pub mod branch;
pub mod catalog;
pub mod grant;
pub mod user;

pub use branch::PgBranchRepository;
pub use catalog::{PgModuleRepository, PgPermissionRepository, PgRoleRepository};
pub use grant::PgGrantRepository;
pub use user::PgUserRepository;

use clinic_core::error::{AppError, ErrorKind};

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx error, turning unique-constraint violations into conflicts.
pub(crate) fn db_error(message: &'static str, err: sqlx::Error) -> AppError {
    let unique = err
        .as_database_error()
        .and_then(|d| d.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);
    let kind = if unique {
        ErrorKind::Conflict
    } else {
        ErrorKind::Database
    };
    AppError::with_source(kind, message, err)
}

/// `%term%` pattern for `ILIKE` searches.
pub(crate) fn like_pattern(term: Option<String>) -> Option<String> {
    term.map(|t| format!("%{t}%"))
}
