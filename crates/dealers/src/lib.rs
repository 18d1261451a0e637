//! Dealers domain module.
//!
//! Dealer records as supplied by the data source, plus the plafond (credit
//! ceiling) display rules. Pure domain logic: no IO, no HTTP, no storage.

pub mod dealer;
pub mod plafond;

pub use dealer::{Dealer, DealerAddress};
pub use plafond::{format_amount, format_plafond, Plafond};
