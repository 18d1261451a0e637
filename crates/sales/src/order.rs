use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use dealerdesk_core::time::optional_timestamp;
use dealerdesk_core::{Amount, DealerId, Entity, OrderId, VehicleId};
use dealerdesk_dealers::Dealer;
use dealerdesk_inventory::Vehicle;

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Processing,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// The independent paperwork flags tracked on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderFlag {
    Licensable,
    Proforma,
    Paid,
    Invoiced,
    Conformity,
}

impl OrderFlag {
    pub const ALL: [OrderFlag; 5] = [
        OrderFlag::Licensable,
        OrderFlag::Proforma,
        OrderFlag::Paid,
        OrderFlag::Invoiced,
        OrderFlag::Conformity,
    ];

    /// Wire name of the order field (and of the matching filter field).
    pub fn field_name(&self) -> &'static str {
        match self {
            OrderFlag::Licensable => "isLicensable",
            OrderFlag::Proforma => "hasProforma",
            OrderFlag::Paid => "isPaid",
            OrderFlag::Invoiced => "isInvoiced",
            OrderFlag::Conformity => "hasConformity",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.field_name() == name)
    }
}

/// Order snapshot.
///
/// `vehicle` and `dealer` are the related records when the data source
/// populated them (joined query); filters on vehicle model need `vehicle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub vehicle_id: VehicleId,
    pub dealer_id: DealerId,
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_licensable: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub has_proforma: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_paid: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_invoiced: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub has_conformity: bool,
    #[serde(default, with = "optional_timestamp")]
    pub order_date: Option<DateTime<Utc>>,
    /// Persistently assigned sequence number; never recomputed once set.
    #[serde(default)]
    pub progressive_number: Option<u32>,
    #[serde(default)]
    pub price: Option<Amount>,
    #[serde(default, with = "optional_timestamp")]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
    #[serde(default)]
    pub dealer: Option<Dealer>,
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl Order {
    pub fn new(id: OrderId, vehicle_id: VehicleId, dealer_id: DealerId, status: OrderStatus) -> Self {
        Self {
            id,
            vehicle_id,
            dealer_id,
            status,
            is_licensable: false,
            has_proforma: false,
            is_paid: false,
            is_invoiced: false,
            has_conformity: false,
            order_date: None,
            progressive_number: None,
            price: None,
            delivery_date: None,
            vehicle: None,
            dealer: None,
        }
    }

    pub fn flag(&self, flag: OrderFlag) -> bool {
        match flag {
            OrderFlag::Licensable => self.is_licensable,
            OrderFlag::Proforma => self.has_proforma,
            OrderFlag::Paid => self.is_paid,
            OrderFlag::Invoiced => self.is_invoiced,
            OrderFlag::Conformity => self.has_conformity,
        }
    }

    pub fn set_flag(&mut self, flag: OrderFlag, value: bool) {
        match flag {
            OrderFlag::Licensable => self.is_licensable = value,
            OrderFlag::Proforma => self.has_proforma = value,
            OrderFlag::Paid => self.is_paid = value,
            OrderFlag::Invoiced => self.is_invoiced = value,
            OrderFlag::Conformity => self.has_conformity = value,
        }
    }

    /// Model of the populated vehicle relation, if any.
    pub fn vehicle_model(&self) -> Option<&str> {
        self.vehicle.as_ref().map(|v| v.model.as_str())
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_flags_decode_as_false() {
        let raw = format!(
            r#"{{
                "id": "{}",
                "vehicleId": "{}",
                "dealerId": "{}",
                "status": "processing",
                "isPaid": null,
                "hasProforma": true,
                "orderDate": "2024-01-01",
                "progressiveNumber": 12
            }}"#,
            OrderId::new(),
            VehicleId::new(),
            DealerId::new(),
        );

        let order: Order = serde_json::from_str(&raw).unwrap();
        assert!(!order.is_paid);
        assert!(order.has_proforma);
        assert!(!order.is_invoiced);
        assert_eq!(order.progressive_number, Some(12));
        assert!(order.order_date.is_some());
        assert!(order.vehicle.is_none());
    }

    #[test]
    fn invalid_order_date_fails_loudly() {
        let raw = format!(
            r#"{{"id":"{}","vehicleId":"{}","dealerId":"{}","status":"delivered","orderDate":"31/12/2023"}}"#,
            OrderId::new(),
            VehicleId::new(),
            DealerId::new(),
        );
        assert!(serde_json::from_str::<Order>(&raw).is_err());
    }

    #[test]
    fn flag_accessors_cover_every_field() {
        let mut order = Order::new(OrderId::new(), VehicleId::new(), DealerId::new(), OrderStatus::Processing);
        for flag in OrderFlag::ALL {
            assert!(!order.flag(flag));
            order.set_flag(flag, true);
            assert!(order.flag(flag));
            assert_eq!(OrderFlag::from_field_name(flag.field_name()), Some(flag));
        }
    }
}
