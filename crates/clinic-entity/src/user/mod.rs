//! User entities.

pub mod model;

pub use model::{User, UserWithRole};
