use std::path::PathBuf;
use std::sync::Arc;

use ad_catalog::{AdCatalog, AdRecord, CategoryFilter, ListedAd, UserInterests};
use adrewards_db::Database;
use chrono::Utc;
use reward_ledger::{ClaimOutcome, ClaimSource, LedgerError, RewardLedger, TabCounts, UseOutcome};
use tokio::sync::RwLock;

use crate::config::{AppConfig, SettingsManager};
use crate::profile::{Profile, UserStats};
use crate::watch::WatchSession;

/// Application state handed to every screen. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Application configuration (reloadable)
    config: RwLock<AppConfig>,
    db: Database,
    catalog: AdCatalog<Database>,
    ledger: RewardLedger<Database>,
    profile: Profile<Database>,
    data_dir: PathBuf,
}

impl AppState {
    /// Create state from an already-opened database and loaded config.
    pub fn new(db: Database, config: AppConfig, data_dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                catalog: AdCatalog::with_sample_ads(db.clone()),
                ledger: RewardLedger::new(db.clone()),
                profile: Profile::new(db.clone()),
                db,
                data_dir,
            }),
        }
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn catalog(&self) -> &AdCatalog<Database> {
        &self.inner.catalog
    }

    pub fn ledger(&self) -> &RewardLedger<Database> {
        &self.inner.ledger
    }

    pub fn profile(&self) -> &Profile<Database> {
        &self.inner.profile
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.inner.data_dir
    }

    /// Get a read lock on the current config.
    pub async fn config(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.config.read().await
    }

    /// Reload config from the database.
    pub async fn reload_config(&self) -> Result<(), anyhow::Error> {
        let sm = SettingsManager::new(self.inner.db.clone());
        let mut config = self.inner.config.write().await;
        config.reload(&sm)?;
        Ok(())
    }

    /// Clear a stored preference and pick up its default.
    pub async fn reset_setting(&self, key: &str) -> Result<(), anyhow::Error> {
        SettingsManager::new(self.inner.db.clone()).reset_setting(key)?;
        self.reload_config().await
    }

    /// Home screen listing. Interests only shape the order when the user
    /// has interest filtering turned on.
    pub async fn feed(&self, category: CategoryFilter, tags: &[String]) -> Vec<ListedAd<'_>> {
        let interests = if self.config().await.filter_by_interests {
            self.profile().interests()
        } else {
            UserInterests::new()
        };
        self.catalog().filtered_ads(category, tags, &interests)
    }

    /// Look up an ad for its detail screen and count the view.
    pub fn open_ad(&self, ad_id: &str) -> Option<&AdRecord> {
        let ad = self.catalog().ad_by_id(ad_id)?;
        self.catalog().track_view(ad_id);
        Some(ad)
    }

    /// Start the simulated watch for an ad; completion bumps the watched count.
    pub fn watch_ad(&self, ad: &AdRecord) -> WatchSession {
        let state = self.clone();
        let ad_id = ad.id.clone();
        WatchSession::start(ad.duration, move || {
            tracing::info!(ad_id = %ad_id, "Ad watch completed");
            state.profile().record_watched_ad();
        })
    }

    pub fn claim_reward(&self, ad_id: &str) -> Result<ClaimOutcome, LedgerError> {
        let ad = self
            .catalog()
            .ad_by_id(ad_id)
            .ok_or_else(|| LedgerError::NotFound(ad_id.to_string()))?;
        self.ledger().claim(&claim_source(ad))
    }

    pub fn use_reward(&self, unique_id: &str) -> Result<UseOutcome, LedgerError> {
        self.ledger().use_reward(unique_id)
    }

    pub fn reward_tabs(&self) -> TabCounts {
        self.ledger().tab_counts(Utc::now())
    }

    pub fn stats(&self) -> UserStats {
        UserStats {
            watched_ads: self.profile().watched_ads(),
            rewards_earned: self.ledger().rewards().len() as u64,
            rewards_used: self.ledger().used_count(),
        }
    }
}

/// The reward-bearing fields of an ad.
pub fn claim_source(ad: &AdRecord) -> ClaimSource {
    ClaimSource::new(
        ad.id.clone(),
        ad.company.clone(),
        ad.reward.clone(),
        ad.promo_code.clone(),
    )
}
