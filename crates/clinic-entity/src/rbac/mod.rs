//! Role-based access control entities.

pub mod grant;
pub mod module;
pub mod permission;
pub mod role;
pub mod view;

pub use grant::{GrantChange, RoleModule, RolePermission, is_effective};
pub use module::{CreateModule, Module, UpdateModule};
pub use permission::{CreatePermission, Permission, UpdatePermission};
pub use role::{CreateRole, Role, UpdateRole};
pub use view::{
    EffectiveModule, EffectivePermission, ModulePermissionStatus, RoleModuleDetail,
    RoleModulePermissions, RolePermissionDetail, UserPermissions,
};
