use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// A claimed promo code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    /// Id of the ad the reward came from.
    pub id: String,
    pub company: String,
    pub reward: String,
    pub promo_code: String,
    pub claimed_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    /// `{id}-{claim epoch millis}`; the ledger's primary key.
    pub unique_id: String,
    #[serde(default)]
    pub used: bool,
}

/// The fields of an ad a claim is made from. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSource {
    pub id: Option<String>,
    pub company: Option<String>,
    pub reward: Option<String>,
    pub promo_code: Option<String>,
}

impl ClaimSource {
    pub fn new(
        id: impl Into<String>,
        company: impl Into<String>,
        reward: impl Into<String>,
        promo_code: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            company: Some(company.into()),
            reward: Some(reward.into()),
            promo_code: Some(promo_code.into()),
        }
    }

    /// Borrow all four fields, or name the first one that is missing or blank.
    pub(crate) fn require(&self) -> Result<(&str, &str, &str, &str), LedgerError> {
        Ok((
            required(&self.id, "id")?,
            required(&self.company, "company")?,
            required(&self.reward, "reward")?,
            required(&self.promo_code, "promoCode")?,
        ))
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, LedgerError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(LedgerError::MalformedSource(field)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    Added(Reward),
    /// An entry with the same ad id and promo code already exists.
    Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseOutcome {
    Redeemed { promo_code: String },
    AlreadyUsed,
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_first_missing_field() {
        let full = ClaimSource::new("2", "Starbucks", "BOGO", "SBUX2FOR1");
        assert_eq!(
            full.require().unwrap(),
            ("2", "Starbucks", "BOGO", "SBUX2FOR1")
        );

        let no_code = ClaimSource {
            promo_code: None,
            ..full.clone()
        };
        assert!(matches!(
            no_code.require(),
            Err(LedgerError::MalformedSource("promoCode"))
        ));

        let blank_company = ClaimSource {
            company: Some("  ".into()),
            ..full
        };
        assert!(matches!(
            blank_company.require(),
            Err(LedgerError::MalformedSource("company"))
        ));
    }

    #[test]
    fn source_deserializes_with_missing_fields() {
        let src: ClaimSource =
            serde_json::from_str(r#"{"id":"2","company":"Starbucks","reward":"BOGO"}"#).unwrap();
        assert_eq!(src.promo_code, None);
    }

    #[test]
    fn reward_uses_camel_case_and_defaults_used() {
        let json = r#"{
            "id": "1", "company": "Nike", "reward": "15% OFF", "promoCode": "NIKE15RUN",
            "claimedDate": "2025-03-01T10:00:00Z", "expiryDate": "2025-03-31T10:00:00Z",
            "uniqueId": "1-1740823200000"
        }"#;
        let reward: Reward = serde_json::from_str(json).unwrap();
        assert!(!reward.used);
        assert_eq!(reward.promo_code, "NIKE15RUN");

        let value = serde_json::to_value(&reward).unwrap();
        assert_eq!(value["uniqueId"], "1-1740823200000");
        assert_eq!(value["used"], false);
    }
}
