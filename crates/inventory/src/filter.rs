//! Multi-field vehicle filter.
//!
//! Every field is an independent predicate and the filter is their
//! conjunction. An empty set (or unset range / blank search) imposes no
//! constraint on its field.

use serde::{Deserialize, Serialize};

use dealerdesk_core::{Amount, DealerId, ValueObject};

use crate::vehicle::{Vehicle, VehicleStatus};

/// Inclusive price window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Amount,
    pub max: Amount,
}

impl ValueObject for PriceRange {}

impl PriceRange {
    pub fn new(min: Amount, max: Amount) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: Amount) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Acceptable values per vehicle field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleFilter {
    pub models: Vec<String>,
    pub trims: Vec<String>,
    pub fuel_types: Vec<String>,
    pub colors: Vec<String>,
    pub locations: Vec<String>,
    pub status: Vec<VehicleStatus>,
    /// Matched against `Vehicle::reserved_by`.
    pub dealers: Vec<DealerId>,
    pub search_text: String,
    pub price_range: Option<PriceRange>,
}

impl VehicleFilter {
    /// Whether no field constrains anything.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
            && self.trims.is_empty()
            && self.fuel_types.is_empty()
            && self.colors.is_empty()
            && self.locations.is_empty()
            && self.status.is_empty()
            && self.dealers.is_empty()
            && self.search_text.trim().is_empty()
            && self.price_range.is_none()
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        member(&self.models, &vehicle.model)
            && member(&self.trims, &vehicle.trim)
            && member(&self.fuel_types, &vehicle.fuel_type)
            && member(&self.colors, &vehicle.exterior_color)
            && member(&self.locations, &vehicle.location)
            && (self.status.is_empty() || self.status.contains(&vehicle.status))
            && self.matches_dealer(vehicle)
            && self.price_range.is_none_or(|range| range.contains(vehicle.price))
            && self.matches_search(vehicle)
    }

    fn matches_dealer(&self, vehicle: &Vehicle) -> bool {
        if self.dealers.is_empty() {
            return true;
        }
        vehicle
            .reserved_by
            .is_some_and(|dealer| self.dealers.contains(&dealer))
    }

    fn matches_search(&self, vehicle: &Vehicle) -> bool {
        if self.search_text.trim().is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        vehicle
            .searchable_fields()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

fn member(accepted: &[String], value: &str) -> bool {
    accepted.is_empty() || accepted.iter().any(|a| a == value)
}

/// Select the vehicles matching `filter`, preserving input order.
pub fn filter_vehicles<'a, I>(vehicles: I, filter: &VehicleFilter) -> Vec<Vehicle>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let selected: Vec<Vehicle> = vehicles
        .into_iter()
        .filter(|v| filter.matches(v))
        .cloned()
        .collect();
    tracing::debug!(matched = selected.len(), "filtered vehicles");
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dealerdesk_core::VehicleId;
    use proptest::prelude::*;

    fn vehicle(model: &str, color: &str, location: &str, status: VehicleStatus) -> Vehicle {
        Vehicle {
            id: VehicleId::new(),
            model: model.to_string(),
            trim: "Base".to_string(),
            fuel_type: "Benzina".to_string(),
            exterior_color: color.to_string(),
            transmission: "Manuale".to_string(),
            accessories: vec![],
            price: Amount::from_euros(20_000),
            status,
            location: location.to_string(),
            telaio: None,
            engine_number: None,
            reserved_by: None,
            date_added: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn fleet() -> Vec<Vehicle> {
        vec![
            vehicle("Panda", "Bianco", "Milano", VehicleStatus::Available),
            vehicle("Tipo", "Rosso", "Roma", VehicleStatus::Reserved),
            vehicle("Panda", "Rosso", "Stock Virtuale", VehicleStatus::Available),
            vehicle("500X", "Nero", "Milano", VehicleStatus::Sold),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let vehicles = fleet();
        assert_eq!(filter_vehicles(&vehicles, &VehicleFilter::default()), vehicles);
    }

    #[test]
    fn fields_combine_as_conjunction() {
        let vehicles = fleet();
        let filter = VehicleFilter {
            models: vec!["Panda".to_string()],
            colors: vec!["Rosso".to_string()],
            ..VehicleFilter::default()
        };
        let result = filter_vehicles(&vehicles, &filter);
        assert_eq!(result, vec![vehicles[2].clone()]);
    }

    #[test]
    fn set_membership_accepts_any_listed_value() {
        let vehicles = fleet();
        let filter = VehicleFilter {
            status: vec![VehicleStatus::Reserved, VehicleStatus::Sold],
            ..VehicleFilter::default()
        };
        let result = filter_vehicles(&vehicles, &filter);
        assert_eq!(result, vec![vehicles[1].clone(), vehicles[3].clone()]);
    }

    #[test]
    fn dealer_filter_requires_a_matching_reservation() {
        let dealer = DealerId::new();
        let mut vehicles = fleet();
        vehicles[1].reserved_by = Some(dealer);
        vehicles[3].reserved_by = Some(DealerId::new());

        let filter = VehicleFilter {
            dealers: vec![dealer],
            ..VehicleFilter::default()
        };
        assert_eq!(filter_vehicles(&vehicles, &filter), vec![vehicles[1].clone()]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields_and_accessories() {
        let mut vehicles = fleet();
        vehicles[0].accessories = vec!["Tetto Panoramico".to_string()];
        vehicles[3].telaio = Some("ZFA3340000P123".to_string());

        let by_accessory = VehicleFilter {
            search_text: "panoram".to_string(),
            ..VehicleFilter::default()
        };
        assert_eq!(filter_vehicles(&vehicles, &by_accessory), vec![vehicles[0].clone()]);

        let by_chassis = VehicleFilter {
            search_text: "zfa334".to_string(),
            ..VehicleFilter::default()
        };
        assert_eq!(filter_vehicles(&vehicles, &by_chassis), vec![vehicles[3].clone()]);

        let by_location = VehicleFilter {
            search_text: "VIRTUALE".to_string(),
            ..VehicleFilter::default()
        };
        assert_eq!(filter_vehicles(&vehicles, &by_location), vec![vehicles[2].clone()]);
    }

    #[test]
    fn whitespace_search_is_ignored() {
        let vehicles = fleet();
        let filter = VehicleFilter {
            search_text: "   \t".to_string(),
            ..VehicleFilter::default()
        };
        assert!(filter.is_empty());
        assert_eq!(filter_vehicles(&vehicles, &filter), vehicles);
    }

    #[test]
    fn search_keeps_surrounding_whitespace() {
        let vehicles = fleet();
        let leading_space = VehicleFilter {
            search_text: " panda".to_string(),
            ..VehicleFilter::default()
        };
        assert!(filter_vehicles(&vehicles, &leading_space).is_empty());

        let inner_word = VehicleFilter {
            search_text: " virtuale".to_string(),
            ..VehicleFilter::default()
        };
        assert_eq!(filter_vehicles(&vehicles, &inner_word), vec![vehicles[2].clone()]);
    }

    #[test]
    fn price_range_is_inclusive() {
        let mut vehicles = fleet();
        vehicles[0].price = Amount::from_euros(10_000);
        vehicles[1].price = Amount::from_euros(15_000);
        vehicles[2].price = Amount::from_euros(25_000);
        vehicles[3].price = Amount::from_euros(30_000);

        let filter = VehicleFilter {
            price_range: Some(PriceRange::new(Amount::from_euros(15_000), Amount::from_euros(25_000))),
            ..VehicleFilter::default()
        };
        assert_eq!(
            filter_vehicles(&vehicles, &filter),
            vec![vehicles[1].clone(), vehicles[2].clone()]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let filter = VehicleFilter {
            models: vec!["Panda".to_string()],
            ..VehicleFilter::default()
        };
        assert!(filter_vehicles(&Vec::<Vehicle>::new(), &filter).is_empty());
    }

    #[test]
    fn decodes_partial_filter_json() {
        let filter: VehicleFilter =
            serde_json::from_str(r#"{"models":["Panda"],"searchText":"rosso"}"#).unwrap();
        assert_eq!(filter.models, vec!["Panda".to_string()]);
        assert!(filter.trims.is_empty());
        assert_eq!(filter.price_range, None);
    }

    fn arb_vehicle() -> impl Strategy<Value = Vehicle> {
        (
            prop::sample::select(vec!["Panda", "Tipo", "500X"]),
            prop::sample::select(vec!["Bianco", "Rosso", "Nero"]),
            prop::sample::select(vec!["Milano", "Roma", "Stock Virtuale"]),
            prop::sample::select(VehicleStatus::ALL.to_vec()),
            1i64..100_000i64,
        )
            .prop_map(|(model, color, location, status, price)| {
                let mut v = vehicle(model, color, location, status);
                v.price = Amount::from_euros(price);
                v
            })
    }

    fn arb_filter() -> impl Strategy<Value = VehicleFilter> {
        (
            prop::collection::vec(prop::sample::select(vec!["Panda", "Tipo", "500X"]), 0..3),
            prop::collection::vec(prop::sample::select(vec!["Bianco", "Rosso", "Nero"]), 0..3),
            prop::collection::vec(prop::sample::select(VehicleStatus::ALL.to_vec()), 0..3),
            prop::sample::select(vec!["", "pan", "ROSSO", "milano", "xyz"]),
        )
            .prop_map(|(models, colors, status, search)| VehicleFilter {
                models: models.into_iter().map(str::to_string).collect(),
                colors: colors.into_iter().map(str::to_string).collect(),
                status,
                search_text: search.to_string(),
                ..VehicleFilter::default()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: an all-empty filter is the identity.
        #[test]
        fn unset_filter_is_identity(vehicles in prop::collection::vec(arb_vehicle(), 0..20)) {
            prop_assert_eq!(filter_vehicles(&vehicles, &VehicleFilter::default()), vehicles);
        }

        /// Property: output is an order-preserving subsequence of the input.
        #[test]
        fn output_is_ordered_subsequence(
            vehicles in prop::collection::vec(arb_vehicle(), 0..20),
            filter in arb_filter(),
        ) {
            let output = filter_vehicles(&vehicles, &filter);
            let mut cursor = vehicles.iter();
            for picked in &output {
                prop_assert!(cursor.any(|v| v.id == picked.id));
                prop_assert!(filter.matches(picked));
            }
        }
    }
}
