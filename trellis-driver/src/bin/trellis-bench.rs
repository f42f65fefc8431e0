//! Trellis benchmark binary.
//!
//! Loads a dataset into the configured runtime and drives a read/update
//! mix against it, one atomic transaction per record access.

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trellis_driver::{workload, DriverConfig, Workload};

#[derive(Parser, Debug)]
#[command(name = "trellis-bench")]
#[command(about = "Record CRUD benchmark over a transactional KV runtime", long_about = None)]
struct Args {
    /// Address of a remote runtime service (e.g. 127.0.0.1:7878)
    #[arg(long, value_name = "ADDR", conflicts_with = "db_path")]
    remote: Option<String>,

    /// Snapshot path for the embedded runtime (created on close if missing)
    #[arg(long, value_name = "PATH")]
    db_path: Option<PathBuf>,

    /// Table name records are written under
    #[arg(long, default_value = "usertable")]
    table: String,

    /// Records to load before the run phase
    #[arg(long, default_value = "1000")]
    records: usize,

    /// Operations to run after loading
    #[arg(long, default_value = "10000")]
    operations: usize,

    /// Fraction of operations that are reads (the rest are updates)
    #[arg(long, default_value = "0.95")]
    read_proportion: f64,

    /// Fields per record (capped at 10)
    #[arg(long, default_value = "10")]
    fields: usize,

    /// Value length in bytes
    #[arg(long, default_value = "100")]
    value_len: usize,

    /// RNG seed for reproducible runs
    #[arg(long, default_value = "42")]
    seed: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = match (&args.remote, &args.db_path) {
        (Some(addr), _) => DriverConfig::new().with_remote(addr.clone()),
        (None, Some(path)) => DriverConfig::new().with_snapshot(path.clone()),
        (None, None) => DriverConfig::new(),
    };

    let mut workload_spec = Workload::new()
        .with_records(args.records)
        .with_operations(args.operations)
        .with_read_proportion(args.read_proportion)
        .with_seed(args.seed);
    workload_spec.table = args.table;
    workload_spec.fields_per_record = args.fields;
    workload_spec.value_len = args.value_len;

    let mut adapter = config.connect().await?;
    let summary = workload::run(&mut adapter, &workload_spec).await;
    if !adapter.cleanup().await.is_ok() {
        warn!("cleanup reported an error");
    }

    info!(
        throughput_ops_s = summary.throughput(),
        errors = summary.errors,
        "done"
    );
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
