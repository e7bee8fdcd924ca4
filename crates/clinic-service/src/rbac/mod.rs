//! Role grant administration and effective-permission projection.

pub mod assignment;
pub mod projector;

pub use assignment::RbacAssignmentService;
pub use projector::UserPermissionService;
