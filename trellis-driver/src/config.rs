//! Driver configuration and store acquisition.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;
use trellis_store::{
    EmbeddedStore, RemoteStore, Result as StoreResult, TransactionalStore,
};

use crate::adapter::RecordAdapter;

/// A store handle behind the configured backend.
pub type BoxedStore = Box<dyn TransactionalStore>;

/// Which transactional runtime the driver talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Backend {
    /// Embedded runtime, volatile.
    InMemory,
    /// Embedded runtime persisted to a snapshot file.
    File { path: PathBuf },
    /// Live runtime service at a network address.
    Remote { addr: String },
}

/// Driver configuration.
///
/// ```
/// use trellis_driver::DriverConfig;
///
/// let config = DriverConfig::new().with_remote("127.0.0.1:7878");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    pub backend: Backend,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            backend: Backend::InMemory,
        }
    }
}

impl DriverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the embedded runtime with a snapshot at `path`.
    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.backend = Backend::File { path: path.into() };
        self
    }

    /// Use a remote runtime service at `addr`.
    pub fn with_remote(mut self, addr: impl Into<String>) -> Self {
        self.backend = Backend::Remote { addr: addr.into() };
        self
    }

    /// Acquire the configured store and wrap it in an adapter. This is the
    /// driver's init hook; `RecordAdapter::cleanup` is its counterpart.
    pub async fn connect(&self) -> StoreResult<RecordAdapter<BoxedStore>> {
        let store: BoxedStore = match &self.backend {
            Backend::InMemory => {
                info!("using embedded in-memory store");
                Box::new(EmbeddedStore::in_memory())
            }
            Backend::File { path } => {
                info!(path = %path.display(), "using embedded persistent store");
                Box::new(EmbeddedStore::open(path)?)
            }
            Backend::Remote { addr } => Box::new(RemoteStore::connect(addr.clone()).await?),
        };
        Ok(RecordAdapter::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_config_connects_in_memory() {
        let mut adapter = DriverConfig::new().connect().await.unwrap();
        let (status, result) = adapter.read("usertable", "user1", None).await;
        assert!(status.is_ok());
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_config_round_trips_through_reconnect() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = DriverConfig::new().with_snapshot(dir.path().join("bench.snapshot"));

        let mut adapter = config.connect().await.unwrap();
        let mut values = std::collections::HashMap::new();
        values.insert("FIELD0".to_string(), "kept".to_string());
        assert!(adapter.insert("usertable", "user1", &values).await.is_ok());
        assert!(adapter.cleanup().await.is_ok());

        let mut adapter = config.connect().await.unwrap();
        let (status, result) = adapter
            .read("usertable", "user1", Some(&["FIELD0"]))
            .await;
        assert!(status.is_ok());
        assert_eq!(result["FIELD0"], "kept");
    }
}
