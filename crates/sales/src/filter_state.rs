//! Order filter state held by the orders screen.
//!
//! Every mutation goes through [`OrderFilterState::handle_filter_change`]
//! (or its untyped front door [`OrderFilterState::apply_named`]), which
//! replaces exactly one field.

use serde::de::DeserializeOwned;
use serde_json::Value;

use dealerdesk_core::{DateRange, DealerId, DomainError, DomainResult};

use crate::filters::{FlagFilter, OrderFilters};
use crate::order::{OrderFlag, OrderStatus};

/// A single-field update of [`OrderFilters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderFilterChange {
    Flag(OrderFlag, FlagFilter),
    DealerId(Option<DealerId>),
    Model(Option<String>),
    SearchText(String),
    DateRange(Option<DateRange>),
    Models(Vec<String>),
    Dealers(Vec<DealerId>),
    Status(Vec<OrderStatus>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilterState {
    filters: OrderFilters,
    show_filters: bool,
}

impl OrderFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &OrderFilters {
        &self.filters
    }

    pub fn show_filters(&self) -> bool {
        self.show_filters
    }

    pub fn set_show_filters(&mut self, visible: bool) {
        self.show_filters = visible;
    }

    pub fn toggle_filters(&mut self) {
        self.show_filters = !self.show_filters;
    }

    /// Replace one field, keeping all others.
    pub fn handle_filter_change(&mut self, change: OrderFilterChange) {
        tracing::debug!(?change, "order filter changed");
        let f = &mut self.filters;
        match change {
            OrderFilterChange::Flag(flag, value) => f.set_flag(flag, value),
            OrderFilterChange::DealerId(v) => f.dealer_id = v,
            OrderFilterChange::Model(v) => f.model = v,
            OrderFilterChange::SearchText(v) => f.search_text = v,
            OrderFilterChange::DateRange(v) => f.date_range = v,
            OrderFilterChange::Models(v) => f.models = v,
            OrderFilterChange::Dealers(v) => f.dealers = v,
            OrderFilterChange::Status(v) => f.status = v,
        }
    }

    /// Decode a `(field name, JSON value)` pair as sent by a form control and
    /// apply it. Unknown names and ill-typed values leave the state untouched.
    pub fn apply_named(&mut self, name: &str, value: Value) -> DomainResult<()> {
        let change = match name {
            "dealerId" => OrderFilterChange::DealerId(decode(name, value)?),
            "model" => OrderFilterChange::Model(decode(name, value)?),
            "searchText" => {
                OrderFilterChange::SearchText(decode::<Option<String>>(name, value)?.unwrap_or_default())
            }
            "dateRange" => OrderFilterChange::DateRange(decode(name, value)?),
            "models" => OrderFilterChange::Models(decode::<Option<_>>(name, value)?.unwrap_or_default()),
            "dealers" => OrderFilterChange::Dealers(decode::<Option<_>>(name, value)?.unwrap_or_default()),
            "status" => OrderFilterChange::Status(decode::<Option<_>>(name, value)?.unwrap_or_default()),
            other => match OrderFlag::from_field_name(other) {
                Some(flag) => OrderFilterChange::Flag(flag, decode(name, value)?),
                None => {
                    return Err(DomainError::validation(format!("unknown order filter: {other}")));
                }
            },
        };
        self.handle_filter_change(change);
        Ok(())
    }

    /// Restore every field to "no constraint".
    pub fn reset_filters(&mut self) {
        self.filters = OrderFilters::default();
    }

    /// Number of fields currently constraining the view (badge count).
    pub fn active_filters_count(&self) -> usize {
        let f = &self.filters;
        let flags = OrderFlag::ALL
            .into_iter()
            .filter(|flag| !f.flag(*flag).is_any())
            .count();
        let others = [
            f.dealer_id.is_some(),
            f.model.as_deref().is_some_and(|m| !m.is_empty()),
            !f.search_text.is_empty(),
            f.date_range.is_some(),
            !f.models.is_empty(),
            !f.dealers.is_empty(),
            !f.status.is_empty(),
        ];
        flags + others.into_iter().filter(|active| *active).count()
    }
}

fn decode<T: DeserializeOwned>(name: &str, value: Value) -> DomainResult<T> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::validation(format!("invalid value for {name}: {e}")))
}
