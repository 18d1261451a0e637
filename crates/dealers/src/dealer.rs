use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dealerdesk_core::time::optional_timestamp;
use dealerdesk_core::{Amount, DealerId, Entity};

/// Postal address of a dealer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerAddress {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

/// Dealer snapshot.
///
/// `credit_limit` is the total credit ceiling; `nuovo_plafond`, when present,
/// is the current plafond shown to operators and takes precedence for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    pub id: DealerId,
    pub company_name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub address: DealerAddress,
    #[serde(default)]
    pub credit_limit: Option<Amount>,
    #[serde(default, rename = "nuovo_plafond", alias = "nuovoPlafond")]
    pub nuovo_plafond: Option<Amount>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, with = "optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Dealer {
    pub fn new(id: DealerId, company_name: impl Into<String>) -> Self {
        Self {
            id,
            company_name: company_name.into(),
            contact_name: None,
            email: None,
            phone: None,
            address: DealerAddress::default(),
            credit_limit: None,
            nuovo_plafond: None,
            is_active: true,
            created_at: None,
        }
    }

    pub fn with_credit_limit(mut self, limit: Amount) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    pub fn with_nuovo_plafond(mut self, plafond: Amount) -> Self {
        self.nuovo_plafond = Some(plafond);
        self
    }
}

impl Entity for Dealer {
    type Id = DealerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_both_plafond_spellings() {
        let id = DealerId::new();
        let snake = format!(
            r#"{{"id":"{id}","companyName":"Autosalone Rossi","creditLimit":5000,"nuovo_plafond":0}}"#
        );
        let camel = format!(
            r#"{{"id":"{id}","companyName":"Autosalone Rossi","creditLimit":5000,"nuovoPlafond":0}}"#
        );

        let a: Dealer = serde_json::from_str(&snake).unwrap();
        let b: Dealer = serde_json::from_str(&camel).unwrap();
        assert_eq!(a.nuovo_plafond, Some(Amount::ZERO));
        assert_eq!(a, b);
        assert!(a.is_active);
    }

    #[test]
    fn null_credit_limit_stays_unset() {
        let id = DealerId::new();
        let raw = format!(r#"{{"id":"{id}","companyName":"Moto Bianchi","creditLimit":null}}"#);
        let dealer: Dealer = serde_json::from_str(&raw).unwrap();
        assert_eq!(dealer.credit_limit, None);
    }

    #[test]
    fn flattened_address_fields() {
        let id = DealerId::new();
        let raw = format!(
            r#"{{"id":"{id}","companyName":"Verdi Srl","city":"Torino","zipCode":"10100"}}"#
        );
        let dealer: Dealer = serde_json::from_str(&raw).unwrap();
        assert_eq!(dealer.address.city.as_deref(), Some("Torino"));
        assert_eq!(dealer.address.zip_code.as_deref(), Some("10100"));
    }
}
