//! Snapshot data source.
//!
//! The hosted database is an external collaborator; the portal only sees it
//! through [`SnapshotSource`], which hands back the latest full set of records.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dealerdesk_dealers::Dealer;
use dealerdesk_inventory::Vehicle;
use dealerdesk_sales::{DealerContract, Order, Quote};

/// Every collection the dashboard derives views from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub vehicles: Vec<Vehicle>,
    pub orders: Vec<Order>,
    pub dealers: Vec<Dealer>,
    pub quotes: Vec<Quote>,
    pub contracts: Vec<DealerContract>,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode snapshot {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot lock poisoned")]
    Poisoned,
}

/// Supplies the most recent snapshot on demand.
pub trait SnapshotSource: Send + Sync {
    fn load(&self) -> Result<Snapshot, SourceError>;
}

impl<S> SnapshotSource for Arc<S>
where
    S: SnapshotSource + ?Sized,
{
    fn load(&self) -> Result<Snapshot, SourceError> {
        (**self).load()
    }
}

/// In-memory source for tests/dev; the snapshot can be swapped between loads.
#[derive(Debug, Default)]
pub struct InMemorySource {
    inner: RwLock<Snapshot>,
}

impl InMemorySource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    pub fn replace(&self, snapshot: Snapshot) -> Result<(), SourceError> {
        let mut guard = self.inner.write().map_err(|_| SourceError::Poisoned)?;
        *guard = snapshot;
        Ok(())
    }
}

impl SnapshotSource for InMemorySource {
    fn load(&self) -> Result<Snapshot, SourceError> {
        let guard = self.inner.read().map_err(|_| SourceError::Poisoned)?;
        Ok(guard.clone())
    }
}

/// Reads a JSON export of the hosted tables.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSource {
    fn load(&self) -> Result<Snapshot, SourceError> {
        let bytes = fs::read(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes).map_err(|source| SourceError::Decode {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(
            path = %self.path.display(),
            vehicles = snapshot.vehicles.len(),
            orders = snapshot.orders.len(),
            dealers = snapshot.dealers.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealerdesk_core::DealerId;

    #[test]
    fn in_memory_source_serves_latest_snapshot() {
        let source = InMemorySource::default();
        assert_eq!(source.load().unwrap(), Snapshot::default());

        let mut next = Snapshot::default();
        next.dealers.push(Dealer::new(DealerId::new(), "Nuova Auto"));
        source.replace(next.clone()).unwrap();
        assert_eq!(source.load().unwrap(), next);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = JsonFileSource::new("/definitely/not/here/snapshot.json");
        match source.load() {
            Err(SourceError::Io { path, .. }) => assert_eq!(path, source.path()),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn partial_snapshot_json_defaults_missing_collections() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"dealers": []}"#).unwrap();
        assert!(snapshot.orders.is_empty());
        assert!(snapshot.vehicles.is_empty());
    }
}
