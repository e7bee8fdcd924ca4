//! Read-back of the branch resolved for the request.

use clinic_core::messages::MessageKey;

use crate::dto::ApiResponse;
use crate::dto::response::BranchContextResponse;
use crate::extractors::CurrentBranch;

/// GET /context/branch
pub async fn branch_context(
    CurrentBranch(context): CurrentBranch,
) -> ApiResponse<BranchContextResponse> {
    ApiResponse::ok(
        MessageKey::BranchContextFetched,
        BranchContextResponse {
            branch_id: context.branch_id,
            source: context.source,
            is_admin_filtering: context.is_admin_filtering,
            user_id: context.current_user.map(|u| u.user.id),
        },
    )
}
