//! Per-user view counts and the recently-viewed list.

use std::collections::HashMap;

use adrewards_db::{KeyValueStore, keys};

use crate::CatalogError;
use crate::model::AdRecord;

/// Maximum length of the recently-viewed list.
pub const RECENTLY_VIEWED_CAPACITY: usize = 5;

/// Snapshot of `viewedAds` and `recentlyViewed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewHistory {
    pub counts: HashMap<String, u32>,
    /// Most recent first, no duplicates.
    pub recent: Vec<String>,
}

impl ViewHistory {
    /// Load both blobs, treating unreadable or corrupt state as "no views".
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        let counts = store
            .get_json::<HashMap<String, u32>>(keys::VIEWED_ADS)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to read view counts, assuming none: {e}");
                None
            })
            .unwrap_or_default();
        let recent = store
            .get_json::<Vec<String>>(keys::RECENTLY_VIEWED)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to read recently viewed ads, assuming none: {e}");
                None
            })
            .unwrap_or_default();
        Self { counts, recent }
    }

    pub fn save<S: KeyValueStore>(&self, store: &S) -> Result<(), CatalogError> {
        store
            .set_json(keys::VIEWED_ADS, &self.counts)
            .map_err(CatalogError::StorageWrite)?;
        store
            .set_json(keys::RECENTLY_VIEWED, &self.recent)
            .map_err(CatalogError::StorageWrite)?;
        Ok(())
    }

    pub fn views_of(&self, ad_id: &str) -> u32 {
        self.counts.get(ad_id).copied().unwrap_or(0)
    }

    /// The ad has been shown as many times as its limit allows.
    pub fn is_exhausted(&self, ad: &AdRecord) -> bool {
        self.views_of(&ad.id) >= ad.effective_view_limit()
    }

    pub fn is_recent(&self, ad_id: &str) -> bool {
        self.recent.iter().any(|id| id == ad_id)
    }

    /// Count one view and move the ad to the front of the recent list.
    pub fn record(&mut self, ad_id: &str) {
        let count = self.counts.entry(ad_id.to_string()).or_insert(0);
        *count = count.saturating_add(1);

        self.recent.retain(|id| id != ad_id);
        self.recent.insert(0, ad_id.to_string());
        self.recent.truncate(RECENTLY_VIEWED_CAPACITY);
    }
}
