//! Sales domain module: orders, quotes, contracts and dealer credit.
//!
//! This crate derives views over order/quote snapshots supplied by the data
//! source, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod contract;
pub mod credit;
pub mod filter_state;
pub mod filters;
pub mod numbering;
pub mod order;
pub mod quote;

pub use contract::{contracts_for_dealer, ContractStatus, DealerContract};
pub use credit::{calculate_available_credit, can_place_order, DEFAULT_CREDIT_LIMIT};
pub use filter_state::{OrderFilterChange, OrderFilterState};
pub use filters::{filter_orders, FlagFilter, OrderFilters, OrderViews};
pub use numbering::{order_number, OrderNumbering, NO_ORDER_NUMBER};
pub use order::{Order, OrderFlag, OrderStatus};
pub use quote::{Quote, QuoteStatus, QuoteViews};
