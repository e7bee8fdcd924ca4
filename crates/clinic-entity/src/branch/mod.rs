//! Branch (tenant) entities.

pub mod model;

pub use model::Branch;
