//! Inventory statistics.
//!
//! Virtual stock is not physically in the yard, so it only shows up in
//! `virtual_stock` and never in the physical counts or the stock value.

use std::collections::BTreeMap;

use serde::Serialize;

use dealerdesk_core::Amount;

use crate::vehicle::{Vehicle, VehicleStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    /// Physical vehicles only.
    pub total: usize,
    pub available: usize,
    pub reserved: usize,
    pub sold: usize,
    pub ordered: usize,
    pub delivered: usize,
    pub virtual_stock: usize,
    /// List value of available physical vehicles.
    pub available_value: Amount,
    /// Physical vehicle count per model, sorted by model name.
    pub by_model: BTreeMap<String, usize>,
}

impl InventorySummary {
    pub fn from_vehicles<'a, I>(vehicles: I) -> Self
    where
        I: IntoIterator<Item = &'a Vehicle>,
    {
        let mut summary = InventorySummary::default();
        for vehicle in vehicles {
            if vehicle.is_virtual_stock() {
                summary.virtual_stock += 1;
                continue;
            }

            summary.total += 1;
            *summary.by_model.entry(vehicle.model.clone()).or_default() += 1;
            match vehicle.status {
                VehicleStatus::Available => {
                    summary.available += 1;
                    summary.available_value = summary.available_value + vehicle.price;
                }
                VehicleStatus::Reserved => summary.reserved += 1,
                VehicleStatus::Sold => summary.sold += 1,
                VehicleStatus::Ordered => summary.ordered += 1,
                VehicleStatus::Delivered => summary.delivered += 1,
            }
        }
        summary
    }

    pub fn count(&self, status: VehicleStatus) -> usize {
        match status {
            VehicleStatus::Available => self.available,
            VehicleStatus::Reserved => self.reserved,
            VehicleStatus::Sold => self.sold,
            VehicleStatus::Ordered => self.ordered,
            VehicleStatus::Delivered => self.delivered,
        }
    }
}
