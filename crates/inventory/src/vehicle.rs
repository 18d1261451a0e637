use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dealerdesk_core::time::timestamp;
use dealerdesk_core::{Amount, DealerId, Entity, VehicleId};

/// Location sentinel for virtual (non-physical) stock.
pub const VIRTUAL_STOCK_LOCATION: &str = "Stock Virtuale";

/// Vehicle status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Reserved,
    Sold,
    Ordered,
    Delivered,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 5] = [
        VehicleStatus::Available,
        VehicleStatus::Reserved,
        VehicleStatus::Sold,
        VehicleStatus::Ordered,
        VehicleStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Reserved => "reserved",
            VehicleStatus::Sold => "sold",
            VehicleStatus::Ordered => "ordered",
            VehicleStatus::Delivered => "delivered",
        }
    }
}

/// Vehicle snapshot as supplied by the inventory collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub model: String,
    #[serde(default)]
    pub trim: String,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub exterior_color: String,
    #[serde(default)]
    pub transmission: String,
    #[serde(default)]
    pub accessories: Vec<String>,
    pub price: Amount,
    pub status: VehicleStatus,
    /// Free text; [`VIRTUAL_STOCK_LOCATION`] marks virtual stock.
    pub location: String,
    /// Chassis number.
    #[serde(default)]
    pub telaio: Option<String>,
    /// Engine number.
    #[serde(default)]
    pub engine_number: Option<String>,
    #[serde(default)]
    pub reserved_by: Option<DealerId>,
    #[serde(with = "timestamp")]
    pub date_added: DateTime<Utc>,
}

impl Vehicle {
    pub fn is_virtual_stock(&self) -> bool {
        self.location == VIRTUAL_STOCK_LOCATION
    }

    /// Text fields the free-text search looks into.
    pub(crate) fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.model.as_str(),
            self.trim.as_str(),
            self.fuel_type.as_str(),
            self.exterior_color.as_str(),
            self.location.as_str(),
            self.telaio.as_deref().unwrap_or_default(),
        ]
        .into_iter()
        .chain(self.accessories.iter().map(String::as_str))
    }
}

impl Entity for Vehicle {
    type Id = VehicleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
