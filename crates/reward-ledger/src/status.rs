//! Derived reward state. Nothing here touches storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Reward;

/// Where a reward sits in its lifecycle. `Used` and `Expired` are terminal.
///
/// Doubles as the tab a reward is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardStatus {
    Available,
    Used,
    Expired,
}

impl RewardStatus {
    /// Used wins over expired: a reward redeemed in time stays "used".
    pub fn of(reward: &Reward, now: DateTime<Utc>) -> Self {
        if reward.used {
            RewardStatus::Used
        } else if is_expired(reward, now) {
            RewardStatus::Expired
        } else {
            RewardStatus::Available
        }
    }
}

pub fn is_expired(reward: &Reward, now: DateTime<Utc>) -> bool {
    now > reward.expiry_date
}

/// Rewards listed under `tab`, in ledger order.
pub fn in_tab(rewards: &[Reward], tab: RewardStatus, now: DateTime<Utc>) -> Vec<&Reward> {
    rewards
        .iter()
        .filter(|r| RewardStatus::of(r, now) == tab)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabCounts {
    pub available: usize,
    pub used: usize,
    pub expired: usize,
}

impl TabCounts {
    pub fn tally(rewards: &[Reward], now: DateTime<Utc>) -> Self {
        let mut counts = Self::default();
        for reward in rewards {
            match RewardStatus::of(reward, now) {
                RewardStatus::Available => counts.available += 1,
                RewardStatus::Used => counts.used += 1,
                RewardStatus::Expired => counts.expired += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    fn reward(unique_id: &str, claimed: DateTime<Utc>, used: bool) -> Reward {
        Reward {
            id: "1".into(),
            company: "Nike".into(),
            reward: "15% OFF".into(),
            promo_code: "NIKE15RUN".into(),
            claimed_date: claimed,
            expiry_date: claimed + TimeDelta::days(30),
            unique_id: unique_id.into(),
            used,
        }
    }

    #[test]
    fn expired_unused_reward_is_not_available() {
        let claimed = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let r = reward("a", claimed, false);

        assert_eq!(RewardStatus::of(&r, claimed + TimeDelta::days(29)), RewardStatus::Available);
        // the expiry instant itself is still valid
        assert_eq!(RewardStatus::of(&r, r.expiry_date), RewardStatus::Available);
        assert_eq!(
            RewardStatus::of(&r, r.expiry_date + TimeDelta::seconds(1)),
            RewardStatus::Expired
        );
    }

    #[test]
    fn used_reward_stays_used_after_expiry() {
        let claimed = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let r = reward("a", claimed, true);
        assert_eq!(
            RewardStatus::of(&r, claimed + TimeDelta::days(90)),
            RewardStatus::Used
        );
    }

    #[test]
    fn tabs_partition_the_ledger() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let rewards = vec![
            reward("fresh", now - TimeDelta::days(1), false),
            reward("old", now - TimeDelta::days(40), false),
            reward("spent", now - TimeDelta::days(2), true),
            reward("fresh2", now, false),
        ];

        let ids = |tab: RewardStatus| -> Vec<String> {
            in_tab(&rewards, tab, now)
                .into_iter()
                .map(|r| r.unique_id.clone())
                .collect()
        };
        assert_eq!(ids(RewardStatus::Available), vec!["fresh", "fresh2"]);
        assert_eq!(ids(RewardStatus::Used), vec!["spent"]);
        assert_eq!(ids(RewardStatus::Expired), vec!["old"]);

        assert_eq!(
            TabCounts::tally(&rewards, now),
            TabCounts {
                available: 2,
                used: 1,
                expired: 1,
            }
        );
    }
}
