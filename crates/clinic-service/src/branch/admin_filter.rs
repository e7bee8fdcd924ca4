//! Explicit management of an admin's remembered branch override.

use std::sync::Arc;

use tracing::info;

use clinic_auth::{AdminBranchSessions, BranchResolver};
use clinic_core::result::AppResult;
use clinic_core::types::{BranchId, UserId};

/// Sets, reads, and clears the branch an admin is filtering by.
///
/// The same store backs the implicit override the branch resolver records
/// when an admin sends the override header.
#[derive(Debug, Clone)]
pub struct AdminBranchFilterService {
    resolver: Arc<BranchResolver>,
    sessions: Arc<AdminBranchSessions>,
}

impl AdminBranchFilterService {
    pub fn new(resolver: Arc<BranchResolver>, sessions: Arc<AdminBranchSessions>) -> Self {
        Self { resolver, sessions }
    }

    /// Remember `raw` for the admin once it names an existing active branch.
    pub async fn set(&self, user_id: UserId, raw: &str) -> AppResult<BranchId> {
        let branch_id = self.resolver.validate_branch(raw.trim()).await?;
        self.sessions.set(user_id, branch_id);
        info!(%user_id, %branch_id, "Admin branch filter set");
        Ok(branch_id)
    }

    pub fn get(&self, user_id: UserId) -> Option<BranchId> {
        self.sessions.get(user_id)
    }

    /// Forget the admin's override. Returns the branch that was remembered.
    pub fn clear(&self, user_id: UserId) -> Option<BranchId> {
        let cleared = self.sessions.clear(user_id);
        if let Some(branch_id) = cleared {
            info!(%user_id, %branch_id, "Admin branch filter cleared");
        }
        cleared
    }

    /// Forget every admin's override. Returns how many were dropped.
    pub fn clear_all(&self) -> usize {
        let dropped = self.sessions.clear_all();
        info!(dropped, "All admin branch filters cleared");
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_auth::{IdentityLoader, JwtDecoder};
    use clinic_core::ErrorKind;
    use clinic_core::config::{AuthConfig, BranchConfig};
    use clinic_core::messages::MessageKey;
    use clinic_database::MemoryDatabase;

    fn service(db: &MemoryDatabase) -> AdminBranchFilterService {
        let sessions = Arc::new(AdminBranchSessions::new());
        let identity = IdentityLoader::new(
            JwtDecoder::new(&AuthConfig::default()),
            Arc::new(db.clone()),
        );
        let resolver = BranchResolver::new(
            BranchConfig::default(),
            "/v1/api",
            identity,
            Arc::new(db.clone()),
            Arc::clone(&sessions),
        );
        AdminBranchFilterService::new(Arc::new(resolver), sessions)
    }

    #[tokio::test]
    async fn test_set_get_clear() {
        let db = MemoryDatabase::seeded();
        let branch = db.insert_branch("Centro", true).await;
        let filters = service(&db);
        let admin = UserId::new();

        let set = filters
            .set(admin, &branch.id.to_string())
            .await
            .expect("set");
        assert_eq!(set, branch.id);
        assert_eq!(filters.get(admin), Some(branch.id));

        assert_eq!(filters.clear(admin), Some(branch.id));
        assert_eq!(filters.get(admin), None);
        assert_eq!(filters.clear(admin), None);
    }

    #[tokio::test]
    async fn test_set_rejects_bad_branches_without_storing() {
        let db = MemoryDatabase::seeded();
        let closed = db.insert_branch("Norte", false).await;
        let filters = service(&db);
        let admin = UserId::new();

        let err = filters.set(admin, "not-a-uuid").await.expect_err("format");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message_key(), MessageKey::BranchInvalidUuid);

        let err = filters
            .set(admin, &BranchId::new().to_string())
            .await
            .expect_err("missing");
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = filters
            .set(admin, &closed.id.to_string())
            .await
            .expect_err("inactive");
        assert_eq!(err.message_key(), MessageKey::BranchInactive);

        assert_eq!(filters.get(admin), None);
    }

    #[tokio::test]
    async fn test_clear_all() {
        let db = MemoryDatabase::seeded();
        let branch = db.insert_branch("Sur", true).await;
        let filters = service(&db);
        for _ in 0..3 {
            filters
                .set(UserId::new(), &branch.id.to_string())
                .await
                .expect("set");
        }
        assert_eq!(filters.clear_all(), 3);
        assert_eq!(filters.clear_all(), 0);
    }
}
