//! The record adapter: the public CRUD surface over a transactional store.

use std::collections::HashMap;

use tracing::debug;
use trellis_core::{decode_read, delete_program, read_program, write_program, DEFAULT_FIELDS};
use trellis_store::{Result as StoreResult, TransactionalStore};

/// Outcome of one adapter call. No finer-grained codes cross this
/// boundary; root-cause diagnosis goes through logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

/// CRUD adapter over any [`TransactionalStore`].
///
/// Each call builds one program, submits it in one round trip, and decodes
/// the outcome — regardless of how many fields the record touches. The
/// adapter keeps no state across calls beyond the live store handle.
pub struct RecordAdapter<S> {
    store: S,
}

impl<S: TransactionalStore> RecordAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read a record's fields. `None` reads the canonical default set.
    ///
    /// Returns the decoded field -> value map on success; absent
    /// (never-written or deleted) fields are simply missing from the map.
    /// On any failure the map is empty — no partial results.
    pub async fn read(
        &mut self,
        table: &str,
        key: &str,
        fields: Option<&[&str]>,
    ) -> (Status, HashMap<String, String>) {
        let fields = fields.unwrap_or(&DEFAULT_FIELDS);
        match self.try_read(table, key, fields).await {
            Ok(result) => (Status::Ok, result),
            Err(e) => {
                debug!(table, key, error = %e, "read failed");
                (Status::Error, HashMap::new())
            }
        }
    }

    async fn try_read(
        &mut self,
        table: &str,
        key: &str,
        fields: &[&str],
    ) -> StoreResult<HashMap<String, String>> {
        let program = read_program(table, key, fields);
        let outcome = self.store.execute(&program).await?;
        Ok(decode_read(outcome.text(), fields)?)
    }

    /// Insert a record: one write per field, committed atomically.
    pub async fn insert(
        &mut self,
        table: &str,
        key: &str,
        values: &HashMap<String, String>,
    ) -> Status {
        match self.try_write(table, key, values).await {
            Ok(()) => Status::Ok,
            Err(e) => {
                debug!(table, key, error = %e, "insert failed");
                Status::Error
            }
        }
    }

    async fn try_write(
        &mut self,
        table: &str,
        key: &str,
        values: &HashMap<String, String>,
    ) -> StoreResult<()> {
        let program = write_program(table, key, values)?;
        self.store.execute(&program).await?;
        Ok(())
    }

    /// Update a record. Identical to insert: last write wins per field.
    pub async fn update(
        &mut self,
        table: &str,
        key: &str,
        values: &HashMap<String, String>,
    ) -> Status {
        self.insert(table, key, values).await
    }

    /// Delete a record by erasing every canonical default field to the
    /// empty string. A subsequent default-field read decodes all fields
    /// as absent.
    pub async fn delete(&mut self, table: &str, key: &str) -> Status {
        let program = delete_program(table, key);
        match self.store.execute(&program).await {
            Ok(_) => Status::Ok,
            Err(e) => {
                debug!(table, key, error = %e, "delete failed");
                Status::Error
            }
        }
    }

    /// Range scans are not supported by this layer.
    pub async fn scan(
        &mut self,
        _table: &str,
        _start_key: &str,
        _record_count: usize,
        _fields: Option<&[&str]>,
    ) -> Status {
        Status::Error
    }

    /// Release the store handle.
    pub async fn cleanup(&mut self) -> Status {
        match self.store.close().await {
            Ok(()) => Status::Ok,
            Err(e) => {
                debug!(error = %e, "cleanup failed");
                Status::Error
            }
        }
    }
}
