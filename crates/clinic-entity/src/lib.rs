//! # clinic-entity
//!
//! Domain entity models for the clinic backend. Every struct in this crate
//! represents a database table row or a read-side projection. All entities
//! derive `Debug`, `Clone`, `Serialize`, and database rows additionally
//! derive `sqlx::FromRow`. Entities reference each other by typed id only.

pub mod branch;
pub mod rbac;
pub mod user;
