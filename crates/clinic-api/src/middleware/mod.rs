//! Axum middleware stack.

pub mod access;
pub mod branch;
pub mod cors;
pub mod logging;
