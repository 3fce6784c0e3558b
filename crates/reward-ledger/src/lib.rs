//! Claimed-reward ledger.
//!
//! Rewards are claimed from a watched ad, deduplicated by ad id and promo
//! code, stored as one JSON list under `userRewards`, and later used or left
//! to expire. Expiry is evaluated lazily against the wall clock.

pub mod ledger;
pub mod models;
pub mod status;

pub use ledger::{REWARD_VALIDITY_DAYS, RewardLedger};
pub use models::{ClaimOutcome, ClaimSource, Reward, UseOutcome};
pub use status::{RewardStatus, TabCounts};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Reward source is missing required field '{0}'")]
    MalformedSource(&'static str),

    #[error("Reward not found: {0}")]
    NotFound(String),

    #[error("Failed to read rewards: {0}")]
    StorageRead(#[source] adrewards_db::DbError),

    #[error("Failed to write rewards: {0}")]
    StorageWrite(#[source] adrewards_db::DbError),
}
