//! Persistent reward list with claim/use/remove transitions.

use adrewards_db::{KeyValueStore, keys};
use chrono::{DateTime, TimeDelta, Utc};

use crate::LedgerError;
use crate::models::{ClaimOutcome, ClaimSource, Reward, UseOutcome};
use crate::status::{self, RewardStatus, TabCounts};

/// Days a claimed reward stays redeemable.
pub const REWARD_VALIDITY_DAYS: i64 = 30;

pub struct RewardLedger<S> {
    store: S,
}

impl<S: KeyValueStore> RewardLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All claimed rewards in claim order. Unreadable state reads as empty.
    pub fn rewards(&self) -> Vec<Reward> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!("Failed to read rewards, showing none: {e}");
            Vec::new()
        })
    }

    pub fn rewards_in_tab(&self, tab: RewardStatus, now: DateTime<Utc>) -> Vec<Reward> {
        let rewards = self.rewards();
        status::in_tab(&rewards, tab, now)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn tab_counts(&self, now: DateTime<Utc>) -> TabCounts {
        TabCounts::tally(&self.rewards(), now)
    }

    /// Number of rewards redeemed so far. Unreadable state reads as zero.
    pub fn used_count(&self) -> u64 {
        self.store
            .read_counter(keys::USED_REWARDS_COUNT)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to read used rewards count: {e}");
                0
            })
    }

    pub fn claim(&self, source: &ClaimSource) -> Result<ClaimOutcome, LedgerError> {
        self.claim_at(source, Utc::now())
    }

    /// Add a reward for `source` unless one with the same ad id and promo
    /// code is already in the ledger, whatever its state.
    pub fn claim_at(
        &self,
        source: &ClaimSource,
        now: DateTime<Utc>,
    ) -> Result<ClaimOutcome, LedgerError> {
        let (id, company, reward, promo_code) = source.require()?;

        // Unreadable state is an error here, never an empty ledger.
        let mut rewards = self.load()?;

        if rewards
            .iter()
            .any(|r| r.id == id && r.promo_code == promo_code)
        {
            tracing::info!(ad_id = id, promo_code, "Duplicate reward claim ignored");
            return Ok(ClaimOutcome::Duplicate);
        }

        let entry = Reward {
            id: id.to_string(),
            company: company.to_string(),
            reward: reward.to_string(),
            promo_code: promo_code.to_string(),
            claimed_date: now,
            expiry_date: now + TimeDelta::days(REWARD_VALIDITY_DAYS),
            unique_id: format!("{id}-{}", now.timestamp_millis()),
            used: false,
        };
        rewards.push(entry.clone());
        self.save(&rewards)?;

        tracing::info!(
            ad_id = id,
            unique_id = %entry.unique_id,
            expires = %entry.expiry_date,
            "Reward claimed"
        );
        Ok(ClaimOutcome::Added(entry))
    }

    pub fn use_reward(&self, unique_id: &str) -> Result<UseOutcome, LedgerError> {
        self.use_reward_at(unique_id, Utc::now())
    }

    /// Mark an available reward as used and hand back its promo code.
    ///
    /// Used and expired rewards are left untouched.
    pub fn use_reward_at(
        &self,
        unique_id: &str,
        now: DateTime<Utc>,
    ) -> Result<UseOutcome, LedgerError> {
        let mut rewards = self.load()?;
        let entry = rewards
            .iter_mut()
            .find(|r| r.unique_id == unique_id)
            .ok_or_else(|| LedgerError::NotFound(unique_id.to_string()))?;

        match RewardStatus::of(entry, now) {
            RewardStatus::Used => return Ok(UseOutcome::AlreadyUsed),
            RewardStatus::Expired => return Ok(UseOutcome::Expired),
            RewardStatus::Available => {}
        }

        entry.used = true;
        let promo_code = entry.promo_code.clone();
        self.save(&rewards)?;

        if let Err(e) = self.store.increment_counter(keys::USED_REWARDS_COUNT) {
            tracing::error!("Failed to update used rewards count: {e}");
        }
        tracing::info!(unique_id, "Reward used");
        Ok(UseOutcome::Redeemed { promo_code })
    }

    /// Delete a reward from the ledger regardless of its state.
    pub fn remove(&self, unique_id: &str) -> Result<Reward, LedgerError> {
        let mut rewards = self.load()?;
        let index = rewards
            .iter()
            .position(|r| r.unique_id == unique_id)
            .ok_or_else(|| LedgerError::NotFound(unique_id.to_string()))?;
        let removed = rewards.remove(index);
        self.save(&rewards)?;
        tracing::info!(unique_id, "Reward removed");
        Ok(removed)
    }

    fn load(&self) -> Result<Vec<Reward>, LedgerError> {
        self.store
            .get_json::<Vec<Reward>>(keys::USER_REWARDS)
            .map(Option::unwrap_or_default)
            .map_err(LedgerError::StorageRead)
    }

    fn save(&self, rewards: &[Reward]) -> Result<(), LedgerError> {
        self.store
            .set_json(keys::USER_REWARDS, rewards)
            .map_err(LedgerError::StorageWrite)
    }
}

#[cfg(test)]
mod tests {
    use adrewards_db::{Database, DbError};
    use chrono::TimeZone;

    use super::*;

    fn test_ledger() -> (RewardLedger<Database>, Database) {
        let db = Database::open_in_memory().expect("Failed to create test DB");
        (RewardLedger::new(db.clone()), db)
    }

    fn starbucks() -> ClaimSource {
        ClaimSource::new("2", "Starbucks", "BOGO", "SBUX2FOR1")
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn added(outcome: ClaimOutcome) -> Reward {
        match outcome {
            ClaimOutcome::Added(r) => r,
            ClaimOutcome::Duplicate => panic!("expected Added, got Duplicate"),
        }
    }

    struct ReadOnlyFailure;

    impl KeyValueStore for ReadOnlyFailure {
        fn get_item(&self, _key: &str) -> Result<Option<String>, DbError> {
            Err(DbError::LockPoisoned)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), DbError> {
            panic!("must not write after a failed read")
        }

        fn remove_item(&self, _key: &str) -> Result<(), DbError> {
            panic!("must not write after a failed read")
        }
    }

    #[test]
    fn claim_then_duplicate() {
        let (ledger, _db) = test_ledger();

        let reward = added(ledger.claim_at(&starbucks(), t0()).unwrap());
        assert_eq!(reward.id, "2");
        assert_eq!(reward.promo_code, "SBUX2FOR1");
        assert_eq!(reward.claimed_date, t0());
        assert_eq!(reward.expiry_date, t0() + TimeDelta::days(30));
        assert_eq!(reward.unique_id, format!("2-{}", t0().timestamp_millis()));
        assert!(!reward.used);

        let again = ledger
            .claim_at(&starbucks(), t0() + TimeDelta::seconds(5))
            .unwrap();
        assert_eq!(again, ClaimOutcome::Duplicate);
        assert_eq!(ledger.rewards(), vec![reward]);
    }

    #[test]
    fn same_ad_with_other_promo_code_is_not_a_duplicate() {
        let (ledger, _db) = test_ledger();
        ledger.claim_at(&starbucks(), t0()).unwrap();
        let other = ClaimSource::new("2", "Starbucks", "Free refill", "SBUXREFILL");
        added(ledger.claim_at(&other, t0() + TimeDelta::seconds(1)).unwrap());
        assert_eq!(ledger.rewards().len(), 2);
    }

    #[test]
    fn used_or_expired_reward_still_blocks_reclaim() {
        let (ledger, _db) = test_ledger();
        let reward = added(ledger.claim_at(&starbucks(), t0()).unwrap());
        ledger
            .use_reward_at(&reward.unique_id, t0() + TimeDelta::days(1))
            .unwrap();

        let later = t0() + TimeDelta::days(60);
        assert_eq!(
            ledger.claim_at(&starbucks(), later).unwrap(),
            ClaimOutcome::Duplicate
        );
    }

    #[test]
    fn malformed_source_leaves_ledger_untouched() {
        let (ledger, db) = test_ledger();
        let source = ClaimSource {
            promo_code: None,
            ..starbucks()
        };
        assert!(matches!(
            ledger.claim_at(&source, t0()),
            Err(LedgerError::MalformedSource("promoCode"))
        ));
        assert_eq!(db.get_item(keys::USER_REWARDS).unwrap(), None);

        ledger.claim_at(&starbucks(), t0()).unwrap();
        let before = db.get_item(keys::USER_REWARDS).unwrap();
        let source = ClaimSource {
            id: Some(String::new()),
            ..starbucks()
        };
        assert!(matches!(
            ledger.claim_at(&source, t0()),
            Err(LedgerError::MalformedSource("id"))
        ));
        assert_eq!(db.get_item(keys::USER_REWARDS).unwrap(), before);
    }

    #[test]
    fn use_marks_reward_and_counts_it() {
        let (ledger, _db) = test_ledger();
        let reward = added(ledger.claim_at(&starbucks(), t0()).unwrap());
        let now = t0() + TimeDelta::days(3);

        assert_eq!(
            ledger.use_reward_at(&reward.unique_id, now).unwrap(),
            UseOutcome::Redeemed {
                promo_code: "SBUX2FOR1".into()
            }
        );
        assert_eq!(ledger.used_count(), 1);
        assert_eq!(ledger.rewards_in_tab(RewardStatus::Used, now).len(), 1);
        assert!(ledger.rewards_in_tab(RewardStatus::Available, now).is_empty());

        assert_eq!(
            ledger.use_reward_at(&reward.unique_id, now).unwrap(),
            UseOutcome::AlreadyUsed
        );
        assert_eq!(ledger.used_count(), 1);
    }

    #[test]
    fn expired_reward_cannot_be_used() {
        let (ledger, _db) = test_ledger();
        let reward = added(ledger.claim_at(&starbucks(), t0()).unwrap());
        let late = t0() + TimeDelta::days(31);

        assert_eq!(
            ledger.use_reward_at(&reward.unique_id, late).unwrap(),
            UseOutcome::Expired
        );
        assert_eq!(ledger.used_count(), 0);
        assert_eq!(
            ledger.tab_counts(late),
            TabCounts {
                available: 0,
                used: 0,
                expired: 1,
            }
        );
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let (ledger, _db) = test_ledger();
        assert!(matches!(
            ledger.use_reward_at("nope", t0()),
            Err(LedgerError::NotFound(id)) if id == "nope"
        ));
        assert!(matches!(
            ledger.remove("nope"),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn remove_deletes_only_that_entry() {
        let (ledger, _db) = test_ledger();
        let first = added(ledger.claim_at(&starbucks(), t0()).unwrap());
        let nike = ClaimSource::new("1", "Nike", "15% OFF", "NIKE15RUN");
        let second = added(ledger.claim_at(&nike, t0() + TimeDelta::seconds(1)).unwrap());

        let removed = ledger.remove(&first.unique_id).unwrap();
        assert_eq!(removed, first);
        assert_eq!(ledger.rewards(), vec![second]);
    }

    #[test]
    fn ledger_is_persisted_as_one_blob() {
        let (ledger, db) = test_ledger();
        ledger.claim_at(&starbucks(), t0()).unwrap();

        let reopened = RewardLedger::new(db.clone());
        assert_eq!(reopened.rewards().len(), 1);

        let raw = db.get_item(keys::USER_REWARDS).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["promoCode"], "SBUX2FOR1");
        assert_eq!(value[0]["used"], false);
    }

    #[test]
    fn failed_read_blocks_claim_but_listing_fails_open() {
        let ledger = RewardLedger::new(ReadOnlyFailure);
        assert!(matches!(
            ledger.claim_at(&starbucks(), t0()),
            Err(LedgerError::StorageRead(_))
        ));
        assert!(ledger.rewards().is_empty());
        assert_eq!(ledger.used_count(), 0);
    }

    #[test]
    fn corrupt_blob_reads_as_empty_list() {
        let (ledger, db) = test_ledger();
        db.set_item(keys::USER_REWARDS, "[{").unwrap();
        assert!(ledger.rewards().is_empty());
        assert!(matches!(
            ledger.claim_at(&starbucks(), t0()),
            Err(LedgerError::StorageRead(_))
        ));
    }
}
