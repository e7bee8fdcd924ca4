//! # clinic-api
//!
//! HTTP API layer for the clinic access-control core built on Axum.
//!
//! Provides the REST endpoints, the branch resolution and access guard
//! middleware, extractors, DTOs, and the error envelope.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
