//! Custom Axum extractors.

pub mod auth;
pub mod branch;
pub mod path;
pub mod request;

pub use auth::AuthUser;
pub use branch::CurrentBranch;
pub use path::parse_id;
pub use request::{ApiQuery, ValidatedJson};
