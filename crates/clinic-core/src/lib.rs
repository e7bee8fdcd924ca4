//! # clinic-core
//!
//! Core crate for the clinic backend. Contains configuration schemas,
//! typed identifiers, the bilingual message catalogue, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other clinic crates.

pub mod config;
pub mod error;
pub mod messages;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use messages::{LocalizedMessage, MessageKey};
pub use result::AppResult;
