//! # clinic-auth
//!
//! The per-request access-control core of the clinic backend.
//!
//! ## Modules
//!
//! - `jwt` — access token claims, signature-verified decoding, and minting
//! - `identity` — bearer token to user-with-role resolution
//! - `branch` — branch resolution and the admin branch session store
//! - `rbac` — route access policies and the permission/role evaluators

pub mod branch;
pub mod identity;
pub mod jwt;
pub mod rbac;

pub use branch::{
    AdminBranchSessions, BranchContext, BranchRequest, BranchResolver, BranchSource, Resolution,
};
pub use identity::IdentityLoader;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use rbac::{AccessPolicy, Authorizer, PermissionEvaluator, RoleEvaluator};
