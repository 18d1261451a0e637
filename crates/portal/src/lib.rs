//! `dealerdesk-portal` — wires the domain crates to configuration, logging and
//! the snapshot data source.

pub mod config;
pub mod dashboard;
pub mod snapshot;

pub use config::{ConfigError, PortalConfig};
pub use dashboard::{DashboardReport, DealerCreditLine, OrderRow, OrdersDashboard};
pub use snapshot::{InMemorySource, JsonFileSource, Snapshot, SnapshotSource, SourceError};
