//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use clinic_auth::{
    AdminBranchSessions, Authorizer, BranchResolver, IdentityLoader, JwtDecoder,
    PermissionEvaluator,
};
use clinic_core::config::AppConfig;
use clinic_database::Repositories;
use clinic_service::{
    AdminBranchFilterService, ModuleService, PermissionService, RbacAssignmentService,
    RoleService, UserPermissionService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Persistence ──────────────────────────────────────────
    pub repos: Repositories,

    // ── Access control ───────────────────────────────────────
    /// Bearer token to user resolution
    pub identity: Arc<IdentityLoader>,
    /// Per-request branch resolution
    pub resolver: Arc<BranchResolver>,
    /// Route policy enforcement
    pub authorizer: Arc<Authorizer>,
    /// Admin branch overrides, process-local
    pub sessions: Arc<AdminBranchSessions>,

    // ── Services ─────────────────────────────────────────────
    pub assignment_service: Arc<RbacAssignmentService>,
    pub user_permission_service: Arc<UserPermissionService>,
    pub role_service: Arc<RoleService>,
    pub module_service: Arc<ModuleService>,
    pub permission_service: Arc<PermissionService>,
    pub admin_filter_service: Arc<AdminBranchFilterService>,
}

impl AppState {
    /// Wire every component over one set of repositories.
    pub fn new(config: AppConfig, repos: Repositories) -> Self {
        let sessions = Arc::new(AdminBranchSessions::new());
        let identity = IdentityLoader::new(
            JwtDecoder::new(&config.auth),
            Arc::clone(&repos.users),
        );
        let resolver = Arc::new(BranchResolver::new(
            config.branch.clone(),
            &config.server.api_prefix,
            identity.clone(),
            Arc::clone(&repos.branches),
            Arc::clone(&sessions),
        ));
        let authorizer = Arc::new(Authorizer::new(
            PermissionEvaluator::new(Arc::clone(&repos.grants)),
            config.branch.admin_role_name.as_str(),
        ));

        let assignment_service = Arc::new(RbacAssignmentService::new(
            Arc::clone(&repos.roles),
            Arc::clone(&repos.modules),
            Arc::clone(&repos.permissions),
            Arc::clone(&repos.grants),
        ));
        let user_permission_service = Arc::new(UserPermissionService::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.grants),
        ));
        let role_service = Arc::new(RoleService::new(
            Arc::clone(&repos.roles),
            Arc::clone(&repos.users),
        ));
        let module_service = Arc::new(ModuleService::new(
            Arc::clone(&repos.modules),
            Arc::clone(&repos.permissions),
        ));
        let permission_service = Arc::new(PermissionService::new(
            Arc::clone(&repos.permissions),
            Arc::clone(&repos.modules),
        ));
        let admin_filter_service = Arc::new(AdminBranchFilterService::new(
            Arc::clone(&resolver),
            Arc::clone(&sessions),
        ));

        Self {
            config: Arc::new(config),
            repos,
            identity: Arc::new(identity),
            resolver,
            authorizer,
            sessions,
            assignment_service,
            user_permission_service,
            role_service,
            module_service,
            permission_service,
            admin_filter_service,
        }
    }
}
