//! Ad catalog: the static sample ads, category/tag listings, and the
//! filter/ranker that decides which ads a user sees and in what order.
//!
//! Per-user view counts and the recently-viewed list are persisted through
//! [`adrewards_db::KeyValueStore`]; reads of that state fail open so
//! browsing never blocks on storage.

pub mod catalog;
pub mod defaults;
pub mod filter;
pub mod model;
pub mod views;

pub use catalog::AdCatalog;
pub use filter::{AdQuery, rank_ads};
pub use model::{
    AdRecord, Category, CategoryEntry, CategoryFilter, DEFAULT_VIEW_LIMIT, ListedAd,
    UserInterests,
};
pub use views::{RECENTLY_VIEWED_CAPACITY, ViewHistory};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read view history: {0}")]
    StorageRead(#[source] adrewards_db::DbError),

    #[error("Failed to write view history: {0}")]
    StorageWrite(#[source] adrewards_db::DbError),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}
