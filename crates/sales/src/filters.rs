//! Order filter & derivation engine.
//!
//! Views are always recomputed from the full source collection; they are never
//! derived from one another.

use serde::{Deserialize, Serialize};

use dealerdesk_core::{DateRange, DealerId};

use crate::order::{Order, OrderFlag, OrderStatus};

/// Tri-state filter over a boolean order flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum FlagFilter {
    /// No constraint.
    #[default]
    Any,
    /// Only orders whose flag is set.
    True,
    /// Only orders whose flag is not set.
    False,
}

impl FlagFilter {
    pub fn accepts(&self, value: bool) -> bool {
        match self {
            FlagFilter::Any => true,
            FlagFilter::True => value,
            FlagFilter::False => !value,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, FlagFilter::Any)
    }
}

impl From<Option<bool>> for FlagFilter {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => FlagFilter::Any,
            Some(true) => FlagFilter::True,
            Some(false) => FlagFilter::False,
        }
    }
}

impl From<FlagFilter> for Option<bool> {
    fn from(value: FlagFilter) -> Self {
        match value {
            FlagFilter::Any => None,
            FlagFilter::True => Some(true),
            FlagFilter::False => Some(false),
        }
    }
}

/// Current order filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderFilters {
    pub is_licensable: FlagFilter,
    pub has_proforma: FlagFilter,
    pub is_paid: FlagFilter,
    pub is_invoiced: FlagFilter,
    pub has_conformity: FlagFilter,
    pub dealer_id: Option<DealerId>,
    /// Exact match on the populated vehicle's model; empty means no constraint.
    pub model: Option<String>,
    pub search_text: String,
    pub date_range: Option<DateRange>,
    pub models: Vec<String>,
    pub dealers: Vec<DealerId>,
    pub status: Vec<OrderStatus>,
}

impl OrderFilters {
    pub fn flag(&self, flag: OrderFlag) -> FlagFilter {
        match flag {
            OrderFlag::Licensable => self.is_licensable,
            OrderFlag::Proforma => self.has_proforma,
            OrderFlag::Paid => self.is_paid,
            OrderFlag::Invoiced => self.is_invoiced,
            OrderFlag::Conformity => self.has_conformity,
        }
    }

    pub fn set_flag(&mut self, flag: OrderFlag, value: FlagFilter) {
        match flag {
            OrderFlag::Licensable => self.is_licensable = value,
            OrderFlag::Proforma => self.has_proforma = value,
            OrderFlag::Paid => self.is_paid = value,
            OrderFlag::Invoiced => self.is_invoiced = value,
            OrderFlag::Conformity => self.has_conformity = value,
        }
    }

    /// Flag, relational and extension predicates (everything except the
    /// status gate, which belongs to the view being derived).
    pub fn matches(&self, order: &Order) -> bool {
        OrderFlag::ALL
            .into_iter()
            .all(|flag| self.flag(flag).accepts(order.flag(flag)))
            && self.dealer_id.is_none_or(|dealer| order.dealer_id == dealer)
            && self
                .model
                .as_deref()
                .filter(|model| !model.is_empty())
                .is_none_or(|model| order.vehicle_model() == Some(model))
            && self.matches_extensions(order)
    }

    fn matches_extensions(&self, order: &Order) -> bool {
        let models_ok = self.models.is_empty()
            || order
                .vehicle_model()
                .is_some_and(|m| self.models.iter().any(|wanted| wanted == m));
        let dealers_ok = self.dealers.is_empty() || self.dealers.contains(&order.dealer_id);
        let status_ok = self.status.is_empty() || self.status.contains(&order.status);
        let dates_ok = match &self.date_range {
            None => true,
            Some(range) => order.order_date.is_some_and(|at| range.contains(at)),
        };

        models_ok && dealers_ok && status_ok && dates_ok && self.matches_search(order)
    }

    fn matches_search(&self, order: &Order) -> bool {
        if self.search_text.trim().is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();

        let vehicle_fields = order.vehicle.iter().flat_map(|v| {
            [
                Some(v.model.as_str()),
                Some(v.trim.as_str()),
                v.telaio.as_deref(),
            ]
        });
        let dealer_fields = order.dealer.iter().map(|d| Some(d.company_name.as_str()));

        vehicle_fields
            .chain(dealer_fields)
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Filter `orders` by status scope (`None` = all statuses) and `filters`,
/// preserving input order.
pub fn filter_orders(orders: &[Order], filters: &OrderFilters, status: Option<OrderStatus>) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| status.is_none_or(|s| order.status == s))
        .filter(|order| filters.matches(order))
        .cloned()
        .collect()
}

/// The four simultaneous order views shown to operators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderViews {
    pub all: Vec<Order>,
    pub processing: Vec<Order>,
    pub delivered: Vec<Order>,
    pub cancelled: Vec<Order>,
}

impl OrderViews {
    pub fn derive(orders: &[Order], filters: &OrderFilters) -> Self {
        let views = Self {
            all: filter_orders(orders, filters, None),
            processing: filter_orders(orders, filters, Some(OrderStatus::Processing)),
            delivered: filter_orders(orders, filters, Some(OrderStatus::Delivered)),
            cancelled: filter_orders(orders, filters, Some(OrderStatus::Cancelled)),
        };
        tracing::debug!(
            source = orders.len(),
            all = views.all.len(),
            processing = views.processing.len(),
            delivered = views.delivered.len(),
            cancelled = views.cancelled.len(),
            "derived order views"
        );
        views
    }

    pub fn by_status(&self, status: OrderStatus) -> &[Order] {
        match status {
            OrderStatus::Processing => &self.processing,
            OrderStatus::Delivered => &self.delivered,
            OrderStatus::Cancelled => &self.cancelled,
        }
    }
}
