//! Storage keys in the `kv_store` namespace.
//!
//! Only the catalog, the reward ledger and the profile layer write these;
//! callers above them never touch raw keys.

/// JSON array of interest strings.
pub const USER_INTERESTS: &str = "userInterests";
/// JSON array of claimed rewards.
pub const USER_REWARDS: &str = "userRewards";
/// JSON integer.
pub const USED_REWARDS_COUNT: &str = "usedRewardsCount";
/// JSON integer.
pub const WATCHED_ADS_COUNT: &str = "watchedAdsCount";
/// JSON object mapping ad id to view count.
pub const VIEWED_ADS: &str = "viewedAds";
/// JSON array of ad ids, most recent first.
pub const RECENTLY_VIEWED: &str = "recentlyViewed";
