use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dealerdesk_core::time::timestamp;
use dealerdesk_core::{ContractId, DealerId, Entity, VehicleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Active,
    Completed,
    Cancelled,
}

/// Sale contract between the distributor and a dealer for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerContract {
    pub id: ContractId,
    pub dealer_id: DealerId,
    pub vehicle_id: VehicleId,
    #[serde(with = "timestamp")]
    pub contract_date: DateTime<Utc>,
    pub status: ContractStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Entity for DealerContract {
    type Id = ContractId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Contracts of `dealer`, preserving input order.
pub fn contracts_for_dealer(contracts: &[DealerContract], dealer: DealerId) -> Vec<DealerContract> {
    contracts
        .iter()
        .filter(|c| c.dealer_id == dealer)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(dealer: DealerId, status: ContractStatus) -> DealerContract {
        DealerContract {
            id: ContractId::new(),
            dealer_id: dealer,
            vehicle_id: VehicleId::new(),
            contract_date: Utc::now(),
            status,
            notes: None,
        }
    }

    #[test]
    fn selects_one_dealers_contracts() {
        let mine = DealerId::new();
        let theirs = DealerId::new();
        let contracts = vec![
            contract(mine, ContractStatus::Active),
            contract(theirs, ContractStatus::Active),
            contract(mine, ContractStatus::Completed),
        ];
        assert_eq!(
            contracts_for_dealer(&contracts, mine),
            vec![contracts[0].clone(), contracts[2].clone()]
        );
        assert!(contracts_for_dealer(&contracts, DealerId::new()).is_empty());
    }
}
