//! `dealerdesk-core` — shared building blocks for the dealer-management domain.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod time;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ContractId, DealerId, OrderId, QuoteId, VehicleId};
pub use money::Amount;
pub use time::{parse_timestamp, DateRange};
pub use value_object::ValueObject;
