//! Core type definitions used across the clinic workspace.

pub mod filter;
pub mod id;

pub use filter::CatalogFilter;
pub use id::*;
