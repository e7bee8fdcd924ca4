//! Admin branch filter management.

pub mod admin_filter;

pub use admin_filter::AdminBranchFilterService;
