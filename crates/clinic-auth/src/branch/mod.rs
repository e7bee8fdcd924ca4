//! Branch (tenant) resolution and admin branch overrides.

pub mod resolver;
pub mod session;

pub use resolver::{BranchContext, BranchRequest, BranchResolver, BranchSource, Resolution};
pub use session::AdminBranchSessions;
