//! Benchmark-driver adapter for Trellis.
//!
//! [`RecordAdapter`] is the CRUD surface a benchmark harness drives: read,
//! insert, update, and delete by table and key, each executed as exactly
//! one atomic transaction against the configured store. Callers see only
//! [`Status::Ok`] or [`Status::Error`]; failure causes are logged, never
//! thrown. One adapter per worker thread — the adapter owns its store
//! handle and performs no synchronization of its own.

pub mod adapter;
pub mod config;
pub mod workload;

pub use adapter::{RecordAdapter, Status};
pub use config::{Backend, DriverConfig};
pub use workload::{Summary, Workload};
