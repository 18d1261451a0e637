//! Orders dashboard: the composition the orders screen renders.
//!
//! Each refresh pulls the latest snapshot from the injected source and
//! recomputes every derived view from scratch.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use dealerdesk_core::time::{optional_timestamp, timestamp};
use dealerdesk_core::{Amount, DealerId, DomainResult, OrderId};
use dealerdesk_dealers::{format_plafond, Dealer};
use dealerdesk_inventory::{filter_vehicles, InventorySummary, VehicleFilter};
use dealerdesk_sales::{
    calculate_available_credit, contracts_for_dealer, ContractStatus, Order, OrderFilterChange, OrderFilterState, OrderNumbering,
    OrderStatus, OrderViews, QuoteStatus, QuoteViews,
};

use crate::config::PortalConfig;
use crate::snapshot::{Snapshot, SnapshotSource, SourceError};

/// One line of an order table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: OrderId,
    pub number: String,
    pub status: OrderStatus,
    pub dealer_id: DealerId,
    pub dealer_name: Option<String>,
    pub model: Option<String>,
    #[serde(with = "optional_timestamp")]
    pub order_date: Option<DateTime<Utc>>,
    pub is_paid: bool,
    pub is_invoiced: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderTables {
    pub all: Vec<OrderRow>,
    pub processing: Vec<OrderRow>,
    pub delivered: Vec<OrderRow>,
    pub cancelled: Vec<OrderRow>,
}

/// Credit position of one dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerCreditLine {
    pub dealer_id: DealerId,
    pub company_name: String,
    pub plafond: String,
    pub available_credit: Amount,
    pub processing_orders: usize,
    pub active_contracts: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuoteCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub converted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    #[serde(with = "timestamp")]
    pub generated_at: DateTime<Utc>,
    pub active_filters: usize,
    pub orders: OrderTables,
    pub dealers: Vec<DealerCreditLine>,
    pub quotes: QuoteCounts,
    pub inventory: InventorySummary,
    pub matching_vehicles: usize,
}

pub struct OrdersDashboard<S: SnapshotSource> {
    source: S,
    filters: OrderFilterState,
    vehicle_filter: VehicleFilter,
    refresh_interval: Duration,
}

impl<S: SnapshotSource> OrdersDashboard<S> {
    pub fn new(source: S, config: &PortalConfig) -> Self {
        Self {
            source,
            filters: OrderFilterState::new(),
            vehicle_filter: VehicleFilter::default(),
            refresh_interval: config.refresh_interval,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn filters(&self) -> &OrderFilterState {
        &self.filters
    }

    pub fn handle_filter_change(&mut self, change: OrderFilterChange) {
        self.filters.handle_filter_change(change);
    }

    pub fn apply_named_filter(&mut self, name: &str, value: Value) -> DomainResult<()> {
        self.filters.apply_named(name, value)
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset_filters();
    }

    pub fn set_vehicle_filter(&mut self, filter: VehicleFilter) {
        self.vehicle_filter = filter;
    }

    /// Load the latest snapshot and derive the full report from it.
    pub fn refresh(&self) -> Result<DashboardReport, SourceError> {
        let snapshot = self.source.load()?;
        let report = self.report(&snapshot);
        tracing::info!(
            orders = report.orders.all.len(),
            dealers = report.dealers.len(),
            active_filters = report.active_filters,
            "dashboard refreshed"
        );
        Ok(report)
    }

    /// Derive the report for an already-loaded snapshot.
    pub fn report(&self, snapshot: &Snapshot) -> DashboardReport {
        let dealers: HashMap<DealerId, &Dealer> =
            snapshot.dealers.iter().map(|d| (d.id, d)).collect();
        // Numbering always runs over the unfiltered collection.
        let numbering = OrderNumbering::new(&snapshot.orders);
        let views = OrderViews::derive(&snapshot.orders, self.filters.filters());

        let rows = |orders: &[Order]| -> Vec<OrderRow> {
            orders
                .iter()
                .map(|order| order_row(order, &numbering, &dealers))
                .collect()
        };
        let orders = OrderTables {
            all: rows(&views.all),
            processing: rows(&views.processing),
            delivered: rows(&views.delivered),
            cancelled: rows(&views.cancelled),
        };

        let dealer_lines = snapshot
            .dealers
            .iter()
            .map(|dealer| DealerCreditLine {
                dealer_id: dealer.id,
                company_name: dealer.company_name.clone(),
                plafond: format_plafond(dealer),
                available_credit: calculate_available_credit(dealer, None),
                processing_orders: snapshot
                    .orders
                    .iter()
                    .filter(|o| o.dealer_id == dealer.id && o.status == OrderStatus::Processing)
                    .count(),
                active_contracts: contracts_for_dealer(&snapshot.contracts, dealer.id)
                    .iter()
                    .filter(|c| c.status == ContractStatus::Active)
                    .count(),
            })
            .collect();

        let quote_views = QuoteViews::derive(&snapshot.quotes);
        let quotes = QuoteCounts {
            pending: quote_views.by_status(QuoteStatus::Pending).len(),
            approved: quote_views.by_status(QuoteStatus::Approved).len(),
            rejected: quote_views.by_status(QuoteStatus::Rejected).len(),
            converted: quote_views.by_status(QuoteStatus::Converted).len(),
        };

        DashboardReport {
            generated_at: Utc::now(),
            active_filters: self.filters.active_filters_count(),
            orders,
            dealers: dealer_lines,
            quotes,
            inventory: InventorySummary::from_vehicles(&snapshot.vehicles),
            matching_vehicles: filter_vehicles(&snapshot.vehicles, &self.vehicle_filter).len(),
        }
    }
}

fn order_row(order: &Order, numbering: &OrderNumbering, dealers: &HashMap<DealerId, &Dealer>) -> OrderRow {
    let dealer_name = order
        .dealer
        .as_ref()
        .or_else(|| dealers.get(&order.dealer_id).copied())
        .map(|d| d.company_name.clone());

    OrderRow {
        id: order.id,
        number: numbering.number_of(Some(order)),
        status: order.status,
        dealer_id: order.dealer_id,
        dealer_name,
        model: order.vehicle_model().map(str::to_string),
        order_date: order.order_date,
        is_paid: order.is_paid,
        is_invoiced: order.is_invoiced,
    }
}
