//! Embedded transactional runtime.
//!
//! Programs execute against an in-process cell map. Writes are staged for
//! the duration of a program and committed together at its end, so a
//! program is observed either in full or not at all; reads within a
//! program see its own staged writes first. Persistence is explicit and
//! scoped: a snapshot is loaded once at `open` and saved once at `close`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};
use trellis_core::{Outcome, Step, TxnProgram};

use crate::error::{Result, StoreError};
use crate::TransactionalStore;

/// An in-process transactional store with optional file persistence.
pub struct EmbeddedStore {
    cells: HashMap<String, String>,
    snapshot: Option<PathBuf>,
}

impl EmbeddedStore {
    /// Create a volatile store. Nothing survives `close`.
    pub fn in_memory() -> Self {
        Self {
            cells: HashMap::new(),
            snapshot: None,
        }
    }

    /// Open a store persisted at `path`, loading the snapshot if one
    /// exists. The snapshot is written back on `close`, not on drop.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let cells = if path.exists() {
            let bytes = fs::read(&path)?;
            let cells: HashMap<String, String> = bincode::deserialize(&bytes)
                .map_err(|e| StoreError::Codec(format!("snapshot at {:?}: {}", path, e)))?;
            info!(entries = cells.len(), path = %path.display(), "loaded snapshot");
            cells
        } else {
            debug!(path = %path.display(), "no snapshot, starting empty");
            HashMap::new()
        };

        Ok(Self {
            cells,
            snapshot: Some(path),
        })
    }

    /// The value currently held at a flat key, if any.
    pub fn cell(&self, key: &str) -> Option<&str> {
        self.cells.get(key).map(String::as_str)
    }

    /// Number of flat keys held.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn apply(&mut self, program: &TxnProgram) -> Outcome {
        let mut transcript = String::new();
        let mut staged: HashMap<String, String> = HashMap::new();

        for step in program.steps() {
            match step {
                Step::Read(key) => {
                    if let Some(value) = staged.get(key).or_else(|| self.cells.get(key)) {
                        transcript.push_str(value);
                    }
                }
                Step::Write(key, value) => {
                    staged.insert(key.clone(), value.clone());
                }
                Step::Append(literal) => transcript.push_str(literal),
            }
        }

        // Commit point: all of the program's writes land together.
        for (key, value) in staged {
            self.cells.insert(key, value);
        }

        if program.produces_transcript() {
            Outcome::Text(transcript)
        } else {
            Outcome::Ack
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(path) = &self.snapshot {
            let bytes = bincode::serialize(&self.cells)
                .map_err(|e| StoreError::Codec(format!("snapshot encode: {}", e)))?;
            fs::write(path, bytes)?;
            info!(entries = self.cells.len(), path = %path.display(), "saved snapshot");
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionalStore for EmbeddedStore {
    async fn execute(&mut self, program: &TxnProgram) -> Result<Outcome> {
        Ok(self.apply(program))
    }

    async fn close(&mut self) -> Result<()> {
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_across_programs() {
        let mut store = EmbeddedStore::in_memory();

        let write = TxnProgram::new().write("t$k$F0", "hello");
        assert_eq!(store.execute(&write).await.unwrap(), Outcome::Ack);

        let read = TxnProgram::new().read("t$k$F0").append("\0");
        let outcome = store.execute(&read).await.unwrap();
        assert_eq!(outcome, Outcome::Text("hello\0".into()));
    }

    #[tokio::test]
    async fn test_unset_key_reads_as_empty() {
        let mut store = EmbeddedStore::in_memory();

        let read = TxnProgram::new().read("t$k$F0").append("\0");
        let outcome = store.execute(&read).await.unwrap();
        assert_eq!(outcome.text(), "\0");
    }

    #[tokio::test]
    async fn test_read_your_writes_within_program() {
        let mut store = EmbeddedStore::in_memory();

        let program = TxnProgram::new()
            .write("t$k$F0", "staged")
            .read("t$k$F0")
            .append("\0");
        let outcome = store.execute(&program).await.unwrap();
        assert_eq!(outcome.text(), "staged\0");
    }

    #[tokio::test]
    async fn test_empty_program_is_acknowledged() {
        let mut store = EmbeddedStore::in_memory();
        let outcome = store.execute(&TxnProgram::new()).await.unwrap();
        assert_eq!(outcome, Outcome::Ack);
        assert_eq!(outcome.text(), "");
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cells.snapshot");

        let mut store = EmbeddedStore::open(&path).unwrap();
        store
            .execute(&TxnProgram::new().write("t$k$F0", "persisted"))
            .await
            .unwrap();
        store.close().await.unwrap();

        let reopened = EmbeddedStore::open(&path).unwrap();
        assert_eq!(reopened.cell("t$k$F0"), Some("persisted"));
    }

    #[tokio::test]
    async fn test_unclosed_store_does_not_persist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cells.snapshot");

        {
            let mut store = EmbeddedStore::open(&path).unwrap();
            store
                .execute(&TxnProgram::new().write("t$k$F0", "lost"))
                .await
                .unwrap();
            // Dropped without close.
        }

        let reopened = EmbeddedStore::open(&path).unwrap();
        assert!(reopened.is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_close_is_a_no_op() {
        let mut store = EmbeddedStore::in_memory();
        store
            .execute(&TxnProgram::new().write("t$k$F0", "v"))
            .await
            .unwrap();
        store.close().await.unwrap();
    }
}
