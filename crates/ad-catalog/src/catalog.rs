//! Catalog service: listings, lookup, filtered browsing and view tracking.

use adrewards_db::{KeyValueStore, keys};

use crate::CatalogError;
use crate::defaults::SAMPLE_ADS;
use crate::filter::{AdQuery, rank_ads};
use crate::model::{AdRecord, CategoryEntry, CategoryFilter, ListedAd, UserInterests};
use crate::views::ViewHistory;

/// A fixed list of ads plus the store holding the user's view history.
pub struct AdCatalog<S> {
    store: S,
    ads: Vec<AdRecord>,
}

impl<S: KeyValueStore> AdCatalog<S> {
    pub fn new(store: S, ads: Vec<AdRecord>) -> Self {
        Self { store, ads }
    }

    /// Catalog backed by the built-in sample ads.
    pub fn with_sample_ads(store: S) -> Self {
        Self::new(store, SAMPLE_ADS.clone())
    }

    pub fn ads(&self) -> &[AdRecord] {
        &self.ads
    }

    /// "All" followed by each category present in the catalog, in first-seen order.
    pub fn all_categories(&self) -> Vec<CategoryEntry> {
        let mut names = vec![CategoryFilter::ALL_LABEL.to_string()];
        for ad in &self.ads {
            let name = ad.category.as_str();
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| CategoryEntry {
                id: i.to_string(),
                name,
            })
            .collect()
    }

    /// Every tag used by any ad, deduplicated in first-seen order.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self.ads.iter().flat_map(|ad| ad.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    pub fn ad_by_id(&self, ad_id: &str) -> Option<&AdRecord> {
        self.ads.iter().find(|ad| ad.id == ad_id)
    }

    /// Ads to show for the given selection, best first.
    ///
    /// An empty result is normal once filters are narrow or limits are
    /// reached; callers offer [`reset_views`](Self::reset_views) then.
    pub fn filtered_ads(
        &self,
        category: CategoryFilter,
        selected_tags: &[String],
        interests: &UserInterests,
    ) -> Vec<ListedAd<'_>> {
        let history = self.view_history();
        let query = AdQuery {
            category,
            tags: selected_tags,
            interests,
        };
        let listed = rank_ads(&self.ads, &query, &history);
        tracing::debug!(
            category = %category,
            tags = selected_tags.len(),
            interests = interests.len(),
            results = listed.len(),
            "Filtered ads"
        );
        listed
    }

    /// Current view history; unreadable state reads as empty.
    pub fn view_history(&self) -> ViewHistory {
        ViewHistory::load(&self.store)
    }

    /// Record that the user opened an ad. Failures are logged and dropped.
    pub fn track_view(&self, ad_id: &str) {
        if let Err(e) = self.try_track_view(ad_id) {
            tracing::error!(ad_id, "Failed to track ad view: {e}");
        }
    }

    /// Like [`track_view`](Self::track_view) but reports storage errors.
    pub fn try_track_view(&self, ad_id: &str) -> Result<(), CatalogError> {
        let mut history = self.view_history();
        history.record(ad_id);
        history.save(&self.store)?;
        tracing::debug!(ad_id, views = history.views_of(ad_id), "Tracked ad view");
        Ok(())
    }

    /// Forget all view counts and the recently-viewed list.
    pub fn reset_views(&self) -> Result<(), CatalogError> {
        self.store
            .remove_item(keys::VIEWED_ADS)
            .map_err(CatalogError::StorageWrite)?;
        self.store
            .remove_item(keys::RECENTLY_VIEWED)
            .map_err(CatalogError::StorageWrite)?;
        tracing::info!("Reset viewed ads");
        Ok(())
    }
}
