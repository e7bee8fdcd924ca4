//! Admin branch session store.
//!
//! Maps an admin's user id to the branch they last selected. The store is
//! process-local and not durable: selections vanish on restart and are not
//! shared between instances.

use dashmap::DashMap;
use tracing::debug;

use clinic_core::types::{BranchId, UserId};

/// Per-user temporary branch selection for admins.
#[derive(Debug, Default)]
pub struct AdminBranchSessions {
    selections: DashMap<UserId, BranchId>,
}

impl AdminBranchSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection, replacing any previous one.
    pub fn set(&self, user_id: UserId, branch_id: BranchId) {
        debug!(%user_id, %branch_id, "Admin branch selection stored");
        self.selections.insert(user_id, branch_id);
    }

    /// The current selection for a user.
    pub fn get(&self, user_id: UserId) -> Option<BranchId> {
        self.selections.get(&user_id).map(|entry| *entry.value())
    }

    /// Remove a user's selection, returning it if present.
    pub fn clear(&self, user_id: UserId) -> Option<BranchId> {
        self.selections.remove(&user_id).map(|(_, branch_id)| branch_id)
    }

    /// Remove every selection. Returns how many were removed.
    pub fn clear_all(&self) -> usize {
        let count = self.selections.len();
        self.selections.clear();
        debug!(count, "All admin branch selections cleared");
        count
    }

    /// Number of users with an active selection.
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
