//! Load-then-run record workload, YCSB-flavored.

use std::collections::HashMap;
use std::time::Instant;

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;
use trellis_core::DEFAULT_FIELDS;
use trellis_store::TransactionalStore;

use crate::adapter::RecordAdapter;

/// Workload shape: load `records`, then run `operations` as a read/update
/// mix over uniformly chosen keys. Seeded for reproducible runs.
#[derive(Debug, Clone)]
pub struct Workload {
    pub table: String,
    pub records: usize,
    pub operations: usize,
    /// Fraction of operations that are reads; the rest are updates.
    pub read_proportion: f64,
    /// Fields written per record, capped at the canonical ten.
    pub fields_per_record: usize,
    pub value_len: usize,
    pub seed: u64,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            table: "usertable".to_string(),
            records: 1000,
            operations: 10_000,
            read_proportion: 0.95,
            fields_per_record: DEFAULT_FIELDS.len(),
            value_len: 100,
            seed: 42,
        }
    }
}

impl Workload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, records: usize) -> Self {
        self.records = records;
        self
    }

    pub fn with_operations(mut self, operations: usize) -> Self {
        self.operations = operations;
        self
    }

    pub fn with_read_proportion(mut self, proportion: f64) -> Self {
        self.read_proportion = proportion.clamp(0.0, 1.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn record_key(&self, index: usize) -> String {
        format!("user{}", index)
    }

    fn record_values(&self, rng: &mut StdRng) -> HashMap<String, String> {
        DEFAULT_FIELDS
            .iter()
            .take(self.fields_per_record.min(DEFAULT_FIELDS.len()))
            .map(|field| (field.to_string(), random_value(rng, self.value_len)))
            .collect()
    }
}

fn random_value(rng: &mut StdRng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Result of one workload run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub loaded: usize,
    pub operations: usize,
    pub errors: usize,
    pub elapsed_ms: u128,
}

impl Summary {
    /// Operations per second over the run phase.
    pub fn throughput(&self) -> f64 {
        if self.elapsed_ms == 0 {
            return 0.0;
        }
        self.operations as f64 * 1000.0 / self.elapsed_ms as f64
    }
}

/// Load the dataset, then drive the operation mix. Every operation is one
/// adapter call, hence one transaction round trip.
pub async fn run<S: TransactionalStore>(
    adapter: &mut RecordAdapter<S>,
    workload: &Workload,
) -> Summary {
    let mut rng = StdRng::seed_from_u64(workload.seed);
    let mut errors = 0;

    info!(records = workload.records, "loading dataset");
    for i in 0..workload.records {
        let key = workload.record_key(i);
        let values = workload.record_values(&mut rng);
        if !adapter.insert(&workload.table, &key, &values).await.is_ok() {
            errors += 1;
        }
    }

    let operations = if workload.records == 0 {
        0
    } else {
        workload.operations
    };

    info!(operations, read_proportion = workload.read_proportion, "running");
    let start = Instant::now();
    for _ in 0..operations {
        let key = workload.record_key(rng.gen_range(0..workload.records));
        let ok = if rng.gen_bool(workload.read_proportion) {
            adapter.read(&workload.table, &key, None).await.0.is_ok()
        } else {
            let values = workload.record_values(&mut rng);
            adapter.update(&workload.table, &key, &values).await.is_ok()
        };
        if !ok {
            errors += 1;
        }
    }
    let elapsed_ms = start.elapsed().as_millis();

    Summary {
        loaded: workload.records,
        operations,
        errors,
        elapsed_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_store::EmbeddedStore;

    #[tokio::test]
    async fn test_run_completes_without_errors() {
        let mut adapter = RecordAdapter::new(EmbeddedStore::in_memory());
        let workload = Workload::new()
            .with_records(20)
            .with_operations(100)
            .with_seed(7);

        let summary = run(&mut adapter, &workload).await;
        assert_eq!(summary.loaded, 20);
        assert_eq!(summary.operations, 100);
        assert_eq!(summary.errors, 0);
    }

    #[tokio::test]
    async fn test_same_seed_loads_same_data() {
        let workload = Workload::new().with_records(5).with_operations(0);

        let mut first = RecordAdapter::new(EmbeddedStore::in_memory());
        run(&mut first, &workload).await;
        let mut second = RecordAdapter::new(EmbeddedStore::in_memory());
        run(&mut second, &workload).await;

        let (_, a) = first.read("usertable", "user3", None).await;
        let (_, b) = second.read("usertable", "user3", None).await;
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[tokio::test]
    async fn test_empty_dataset_skips_run_phase() {
        let mut adapter = RecordAdapter::new(EmbeddedStore::in_memory());
        let workload = Workload::new().with_records(0).with_operations(100);

        let summary = run(&mut adapter, &workload).await;
        assert_eq!(summary.operations, 0);
        assert_eq!(summary.errors, 0);
    }
}
