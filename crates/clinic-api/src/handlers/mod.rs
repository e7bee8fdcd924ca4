//! HTTP request handlers organized by domain.

pub mod auth;
pub mod context;
pub mod health;
pub mod module;
pub mod permission;
pub mod role;
pub mod role_module;
pub mod role_permission;
