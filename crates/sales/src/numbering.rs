//! Display order numbers.
//!
//! A progressive number, once assigned, is the only basis for the displayed
//! number. Legacy orders without one fall back to their 1-based position in
//! the collection sorted by order date; that position shifts whenever orders
//! are inserted or removed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use dealerdesk_core::{Entity, OrderId};

use crate::order::Order;

/// Number shown when there is no order (or it cannot be located).
pub const NO_ORDER_NUMBER: &str = "#000";

fn pad(n: u64) -> String {
    format!("#{n:03}")
}

/// Positional fallback numbers for one snapshot of orders.
///
/// Build once per snapshot and look up many orders; [`order_number`] is the
/// single-shot form.
#[derive(Debug, Clone, Default)]
pub struct OrderNumbering {
    positions: HashMap<OrderId, u64>,
}

impl OrderNumbering {
    pub fn new(all_orders: &[Order]) -> Self {
        let mut by_date: Vec<&Order> = all_orders.iter().collect();
        // Stable: orders sharing a date keep their input order.
        by_date.sort_by_key(|o| o.order_date.unwrap_or(DateTime::<Utc>::UNIX_EPOCH));

        let mut positions = HashMap::with_capacity(by_date.len());
        for (index, order) in by_date.into_iter().enumerate() {
            positions.entry(*order.id()).or_insert(index as u64 + 1);
        }
        Self { positions }
    }

    pub fn number_of(&self, order: Option<&Order>) -> String {
        let Some(order) = order else {
            return NO_ORDER_NUMBER.to_string();
        };
        if let Some(progressive) = order.progressive_number {
            return pad(u64::from(progressive));
        }
        match self.positions.get(order.id()) {
            Some(position) => pad(*position),
            None => {
                tracing::warn!(order_id = %order.id, "order not present in numbering snapshot");
                NO_ORDER_NUMBER.to_string()
            }
        }
    }
}

/// Display number of `order` within `all_orders`, e.g. `#007`.
pub fn order_number(order: Option<&Order>, all_orders: &[Order]) -> String {
    match order {
        Some(o) if o.progressive_number.is_some() => OrderNumbering::default().number_of(order),
        _ => OrderNumbering::new(all_orders).number_of(order),
    }
}
