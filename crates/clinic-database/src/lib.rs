//! # clinic-database
//!
//! Persistence for the clinic access-control core: repository traits,
//! PostgreSQL implementations backed by sqlx, and a seeded in-memory
//! implementation selected through configuration.

pub mod connection;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod seed;

pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use repository::{
    BranchRepository, GrantRepository, ModuleRepository, PermissionRepository, Repositories,
    RoleRepository, UserRepository,
};
