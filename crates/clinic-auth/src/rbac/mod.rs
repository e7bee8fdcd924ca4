//! Role-based access control: route policies and their evaluation.

pub mod evaluator;
pub mod policy;

pub use evaluator::{Authorizer, PermissionEvaluator, RoleEvaluator};
pub use policy::AccessPolicy;
