//! Filtering and ranking of catalog ads.

use crate::model::{AdRecord, CategoryFilter, ListedAd, UserInterests};
use crate::views::ViewHistory;

/// What the user is browsing for.
#[derive(Debug, Clone, Copy)]
pub struct AdQuery<'q> {
    pub category: CategoryFilter,
    /// Any-match: an ad qualifies if it carries at least one of these.
    pub tags: &'q [String],
    pub interests: &'q UserInterests,
}

/// Select and order the ads to show for `query`.
///
/// Order of operations: category, tags, interest grouping (only for
/// `All`), view-limit exclusion, then a stable sort that pushes recently
/// viewed ads to the back and orders each group by descending popularity.
pub fn rank_ads<'a>(
    catalog: &'a [AdRecord],
    query: &AdQuery<'_>,
    history: &ViewHistory,
) -> Vec<ListedAd<'a>> {
    let mut ads: Vec<&AdRecord> = catalog.iter().collect();

    if let CategoryFilter::Only(category) = query.category {
        ads.retain(|ad| ad.category == category);
    }

    if !query.tags.is_empty() {
        ads.retain(|ad| ad.has_any_tag(query.tags));
    }

    if query.category == CategoryFilter::All && !query.interests.is_empty() {
        let (mut matching, rest): (Vec<_>, Vec<_>) = ads
            .into_iter()
            .partition(|ad| ad.matches_interests(query.interests));
        matching.extend(rest);
        ads = matching;
    }

    ads.retain(|ad| !history.is_exhausted(ad));

    ads.sort_by(|a, b| {
        history
            .is_recent(&a.id)
            .cmp(&history.is_recent(&b.id))
            .then_with(|| b.popularity.total_cmp(&a.popularity))
    });

    ads.into_iter().map(ListedAd::new).collect()
}
