//! Per-request branch resolution.
//!
//! Runs before any handler on every route under the API prefix whose first
//! segment is not excluded. The procedure is strictly ordered:
//!
//! 1. excluded first segment: skip without any lookup
//! 2. identify the caller from the bearer token, leniently
//! 3. pick a candidate branch (admin header, admin session, own branch,
//!    client header)
//! 4. validate the candidate: UUID format, existence, active flag
//!
//! An admin's header override is written to the session store only once the
//! branch has passed validation.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use clinic_core::config::BranchConfig;
use clinic_core::error::AppError;
use clinic_core::messages::MessageKey;
use clinic_core::result::AppResult;
use clinic_core::types::BranchId;
use clinic_database::BranchRepository;
use clinic_entity::user::UserWithRole;

use super::session::AdminBranchSessions;
use crate::identity::IdentityLoader;

/// Hyphenated UUID length, the only textual form accepted in headers.
const HYPHENATED_UUID_LEN: usize = 36;

/// The request facts the resolver consumes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchRequest<'a> {
    /// Request path, including the API prefix.
    pub path: &'a str,
    /// Bearer token, without the scheme.
    pub bearer_token: Option<&'a str>,
    /// Value of the admin override header.
    pub admin_branch: Option<&'a str>,
    /// Value of the client branch header.
    pub branch: Option<&'a str>,
}

/// Where the resolved branch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BranchSource {
    AdminHeader,
    AdminSession,
    UserBranch,
    BranchHeader,
}

/// The resolved branch attached to a request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchContext {
    pub branch_id: BranchId,
    pub source: BranchSource,
    /// The identified caller, if any.
    #[serde(skip)]
    pub current_user: Option<UserWithRole>,
    /// An admin selected the branch through the override header on this request.
    pub is_admin_filtering: bool,
}

/// Outcome of resolution.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Route outside the API prefix or excluded; nothing was looked up.
    Skipped,
    Resolved(BranchContext),
}

enum Candidate<'a> {
    Raw(&'a str),
    Known(BranchId),
}

/// Decides which branch a request operates against.
#[derive(Debug, Clone)]
pub struct BranchResolver {
    config: BranchConfig,
    api_prefix: String,
    identity: IdentityLoader,
    branches: Arc<dyn BranchRepository>,
    sessions: Arc<AdminBranchSessions>,
}

impl BranchResolver {
    pub fn new(
        config: BranchConfig,
        api_prefix: &str,
        identity: IdentityLoader,
        branches: Arc<dyn BranchRepository>,
        sessions: Arc<AdminBranchSessions>,
    ) -> Self {
        Self {
            config,
            api_prefix: api_prefix.trim_end_matches('/').to_string(),
            identity,
            branches,
            sessions,
        }
    }

    /// Resolve the branch for one request.
    ///
    /// An admin header override is remembered in the session store only after
    /// the branch passes validation, so a rejected override never replaces a
    /// previously saved one. Earlier releases saved the raw header first.
    pub async fn resolve(&self, request: BranchRequest<'_>) -> AppResult<Resolution> {
        let Some(segment) = self.route_segment(request.path) else {
            return Ok(Resolution::Skipped);
        };
        if self.config.is_excluded(segment) {
            return Ok(Resolution::Skipped);
        }

        let user = self.identity.identify(request.bearer_token).await?;
        let is_admin = user
            .as_ref()
            .is_some_and(|u| u.has_role(&self.config.admin_role_name));

        let (candidate, source) = self.select(
            user.as_ref(),
            is_admin,
            non_empty(request.admin_branch),
            non_empty(request.branch),
        )?;
        let branch_id = self.validate(candidate).await?;

        if source == BranchSource::AdminHeader {
            if let Some(admin) = &user {
                self.sessions.set(admin.user.id, branch_id);
            }
        }

        debug!(%branch_id, ?source, "Branch resolved");
        Ok(Resolution::Resolved(BranchContext {
            branch_id,
            source,
            current_user: user,
            is_admin_filtering: source == BranchSource::AdminHeader,
        }))
    }

    /// Check that a raw branch id names an existing, active branch.
    pub async fn validate_branch(&self, raw: &str) -> AppResult<BranchId> {
        self.validate(Candidate::Raw(raw)).await
    }

    /// First path segment after the API prefix, `None` outside the prefix.
    fn route_segment<'p>(&self, path: &'p str) -> Option<&'p str> {
        let rest = path.strip_prefix(&self.api_prefix)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }
        rest.trim_start_matches('/').split('/').next()
    }

    fn select<'h>(
        &self,
        user: Option<&UserWithRole>,
        is_admin: bool,
        admin_header: Option<&'h str>,
        branch_header: Option<&'h str>,
    ) -> AppResult<(Candidate<'h>, BranchSource)> {
        if let (true, Some(admin)) = (is_admin, user) {
            if let Some(raw) = admin_header {
                return Ok((Candidate::Raw(raw), BranchSource::AdminHeader));
            }
            if let Some(saved) = self.sessions.get(admin.user.id) {
                return Ok((Candidate::Known(saved), BranchSource::AdminSession));
            }
            return match admin.user.branch_id {
                Some(own) => Ok((Candidate::Known(own), BranchSource::UserBranch)),
                None => Err(AppError::validation("Could not determine branch for admin")
                    .with_key(MessageKey::BranchUndetermined)),
            };
        }

        if let Some(own) = user.and_then(|u| u.user.branch_id) {
            return Ok((Candidate::Known(own), BranchSource::UserBranch));
        }

        if user.is_none() && !self.config.allow_anonymous_fallback {
            return Err(AppError::validation("Branch header fallback disabled for anonymous requests")
                .with_key(MessageKey::BranchUndetermined));
        }

        warn!(
            user_id = ?user.map(|u| u.user.id),
            "User has no branch assigned, falling back to the branch header"
        );
        match branch_header {
            Some(raw) => Ok((Candidate::Raw(raw), BranchSource::BranchHeader)),
            None => Err(AppError::validation("User has no branch and no branch header was sent")
                .with_key(MessageKey::BranchUnassigned)),
        }
    }

    async fn validate(&self, candidate: Candidate<'_>) -> AppResult<BranchId> {
        let branch_id = match candidate {
            Candidate::Known(id) => id,
            Candidate::Raw(raw) => parse_branch_id(raw)?,
        };

        let branch = self.branches.find_by_id(branch_id).await?.ok_or_else(|| {
            AppError::not_found(format!("Branch {branch_id} not found"))
                .with_key(MessageKey::BranchNotFound)
        })?;

        if !branch.is_active {
            return Err(AppError::validation(format!("Branch {branch_id} is not active"))
                .with_key(MessageKey::BranchInactive));
        }

        Ok(branch_id)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_branch_id(raw: &str) -> AppResult<BranchId> {
    let invalid = || {
        AppError::validation(format!("Invalid branch id '{raw}'"))
            .with_key(MessageKey::BranchInvalidUuid)
    };
    if raw.len() != HYPHENATED_UUID_LEN {
        return Err(invalid());
    }
    Uuid::parse_str(raw)
        .map(BranchId::from_uuid)
        .map_err(|_| invalid())
}
