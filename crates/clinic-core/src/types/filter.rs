//! Listing filters for the RBAC catalogue (roles, modules, permissions).

use serde::{Deserialize, Serialize};

/// Query-string filter accepted by catalogue list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    /// Case-insensitive substring matched against name and description.
    #[serde(default)]
    pub search: Option<String>,
    /// Restrict to active or inactive entries.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl CatalogFilter {
    /// Whether an entry with the given fields passes this filter.
    pub fn matches(&self, name: &str, description: Option<&str>, is_active: bool) -> bool {
        if let Some(wanted) = self.is_active {
            if wanted != is_active {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => {
                name.to_lowercase().contains(&term)
                    || description.is_some_and(|d| d.to_lowercase().contains(&term))
            }
            None => true,
        }
    }

    /// The trimmed, lowercased search term, if one was given.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}
