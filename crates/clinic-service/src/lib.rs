//! # clinic-service
//!
//! Service layer for the clinic access-control core. Each service
//! orchestrates repositories and the auth components to implement one
//! administrative use case.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod branch;
pub mod catalog;
pub mod rbac;

pub use branch::AdminBranchFilterService;
pub use catalog::{ModuleService, PermissionService, RoleService};
pub use rbac::{RbacAssignmentService, UserPermissionService};
