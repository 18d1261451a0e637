//! Vehicle inventory domain module.
//!
//! Vehicle snapshots, the multi-field vehicle filter, and inventory summary
//! statistics. Pure, deterministic logic over records supplied by the caller.

pub mod filter;
pub mod summary;
pub mod vehicle;

pub use filter::{filter_vehicles, PriceRange, VehicleFilter};
pub use summary::InventorySummary;
pub use vehicle::{Vehicle, VehicleStatus, VIRTUAL_STOCK_LOCATION};
