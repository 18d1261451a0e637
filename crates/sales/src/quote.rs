use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dealerdesk_core::time::timestamp;
use dealerdesk_core::{Amount, DealerId, Entity, QuoteId, VehicleId};

/// Quote status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Pending,
    Approved,
    Rejected,
    Converted,
}

impl QuoteStatus {
    pub const ALL: [QuoteStatus; 4] = [
        QuoteStatus::Pending,
        QuoteStatus::Approved,
        QuoteStatus::Rejected,
        QuoteStatus::Converted,
    ];
}

/// Quote snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: QuoteId,
    pub vehicle_id: VehicleId,
    pub dealer_id: DealerId,
    pub price: Amount,
    #[serde(default)]
    pub discount: Amount,
    #[serde(default)]
    pub final_price: Option<Amount>,
    pub status: QuoteStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Quote {
    /// Agreed price: the recorded final price, else list price minus
    /// discount (never below zero).
    pub fn effective_price(&self) -> Amount {
        self.final_price
            .unwrap_or_else(|| self.price.saturating_sub_floor_zero(self.discount))
    }
}

impl Entity for Quote {
    type Id = QuoteId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Quotes split by status, each preserving input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteViews {
    pub all: Vec<Quote>,
    pub pending: Vec<Quote>,
    pub approved: Vec<Quote>,
    pub rejected: Vec<Quote>,
    pub converted: Vec<Quote>,
}

impl QuoteViews {
    pub fn derive(quotes: &[Quote]) -> Self {
        let mut views = Self {
            all: quotes.to_vec(),
            ..Self::default()
        };
        for quote in quotes {
            let bucket = match quote.status {
                QuoteStatus::Pending => &mut views.pending,
                QuoteStatus::Approved => &mut views.approved,
                QuoteStatus::Rejected => &mut views.rejected,
                QuoteStatus::Converted => &mut views.converted,
            };
            bucket.push(quote.clone());
        }
        views
    }

    pub fn by_status(&self, status: QuoteStatus) -> &[Quote] {
        match status {
            QuoteStatus::Pending => &self.pending,
            QuoteStatus::Approved => &self.approved,
            QuoteStatus::Rejected => &self.rejected,
            QuoteStatus::Converted => &self.converted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(status: QuoteStatus, price: i64, discount: i64) -> Quote {
        Quote {
            id: QuoteId::new(),
            vehicle_id: VehicleId::new(),
            dealer_id: DealerId::new(),
            price: Amount::from_euros(price),
            discount: Amount::from_euros(discount),
            final_price: None,
            status,
            created_at: Utc::now(),
            notes: None,
        }
    }

    #[test]
    fn effective_price_prefers_final_price() {
        let mut q = quote(QuoteStatus::Pending, 20_000, 1_000);
        assert_eq!(q.effective_price(), Amount::from_euros(19_000));
        q.final_price = Some(Amount::from_euros(18_200));
        assert_eq!(q.effective_price(), Amount::from_euros(18_200));
    }

    #[test]
    fn oversized_discount_floors_at_zero() {
        let q = quote(QuoteStatus::Pending, 1_000, 5_000);
        assert_eq!(q.effective_price(), Amount::ZERO);
    }

    #[test]
    fn views_split_by_status_in_input_order() {
        let quotes = vec![
            quote(QuoteStatus::Approved, 1, 0),
            quote(QuoteStatus::Pending, 2, 0),
            quote(QuoteStatus::Approved, 3, 0),
            quote(QuoteStatus::Converted, 4, 0),
        ];
        let views = QuoteViews::derive(&quotes);
        assert_eq!(views.all, quotes);
        assert_eq!(views.approved, vec![quotes[0].clone(), quotes[2].clone()]);
        assert_eq!(views.by_status(QuoteStatus::Pending), &quotes[1..2]);
        assert!(views.rejected.is_empty());
        let total: usize = QuoteStatus::ALL.iter().map(|s| views.by_status(*s).len()).sum();
        assert_eq!(total, quotes.len());
    }

    #[test]
    fn decodes_without_optional_fields() {
        let raw = format!(
            r#"{{"id":"{}","vehicleId":"{}","dealerId":"{}","price":21000,"status":"approved","createdAt":"2024-05-02 08:15:00+00"}}"#,
            QuoteId::new(),
            VehicleId::new(),
            DealerId::new(),
        );
        let q: Quote = serde_json::from_str(&raw).unwrap();
        assert_eq!(q.discount, Amount::ZERO);
        assert_eq!(q.effective_price(), Amount::from_euros(21_000));
    }
}
