//! User interests and activity counters.

use ad_catalog::UserInterests;
use adrewards_db::{DbError, KeyValueStore, keys};
use serde::{Deserialize, Serialize};

/// Interests offered on the profile screen.
pub const AVAILABLE_INTERESTS: [&str; 8] = [
    "Electronics",
    "Fashion",
    "Food",
    "Sports",
    "Entertainment",
    "Travel",
    "Education",
    "Health",
];

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Interest name must not be empty")]
    EmptyInterest,

    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

/// Activity summary shown on the profile screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub watched_ads: u64,
    pub rewards_earned: u64,
    pub rewards_used: u64,
}

pub struct Profile<S> {
    store: S,
}

impl<S: KeyValueStore> Profile<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn available_interests(&self) -> &'static [&'static str] {
        &AVAILABLE_INTERESTS
    }

    /// Saved interests; unreadable state reads as none.
    pub fn interests(&self) -> UserInterests {
        self.store
            .get_json::<UserInterests>(keys::USER_INTERESTS)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to read interests, assuming none: {e}");
                None
            })
            .unwrap_or_default()
    }

    pub fn set_interests(&self, interests: &UserInterests) -> Result<(), ProfileError> {
        if interests.iter().any(|i| i.trim().is_empty()) {
            return Err(ProfileError::EmptyInterest);
        }
        self.store.set_json(keys::USER_INTERESTS, interests)?;
        tracing::info!(count = interests.len(), "Interests updated");
        Ok(())
    }

    /// Add the interest if absent, remove it if present. Returns whether it
    /// is selected afterwards.
    pub fn toggle_interest(&self, interest: &str) -> Result<bool, ProfileError> {
        let mut interests = self.interests();
        let selected = if interests.remove(interest) {
            false
        } else {
            interests.insert(interest.to_string());
            true
        };
        self.set_interests(&interests)?;
        Ok(selected)
    }

    pub fn watched_ads(&self) -> u64 {
        self.store
            .read_counter(keys::WATCHED_ADS_COUNT)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to read watched ads count: {e}");
                0
            })
    }

    /// Count one completed ad watch. Failures are logged and dropped.
    pub fn record_watched_ad(&self) {
        match self.store.increment_counter(keys::WATCHED_ADS_COUNT) {
            Ok(count) => tracing::debug!(count, "Watched ads count updated"),
            Err(e) => tracing::error!("Failed to update watched ads count: {e}"),
        }
    }
}
