//! Snapshot persistence through the full driver stack.

use std::collections::HashMap;

use tempfile::TempDir;
use trellis_driver::{workload, DriverConfig, Workload};

#[tokio::test]
async fn test_workload_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let config = DriverConfig::new().with_snapshot(dir.path().join("bench.snapshot"));
    let workload = Workload::new().with_records(25).with_operations(0);

    let mut adapter = config.connect().await.unwrap();
    let summary = workload::run(&mut adapter, &workload).await;
    assert_eq!(summary.errors, 0);
    assert!(adapter.cleanup().await.is_ok());

    let mut adapter = config.connect().await.unwrap();
    for i in 0..25 {
        let key = format!("user{}", i);
        let (status, result) = adapter.read("usertable", &key, None).await;
        assert!(status.is_ok());
        assert!(!result.is_empty(), "record {} missing after reopen", key);
    }
}

#[tokio::test]
async fn test_delete_persists_as_erasure() {
    let dir = TempDir::new().unwrap();
    let config = DriverConfig::new().with_snapshot(dir.path().join("bench.snapshot"));

    let mut adapter = config.connect().await.unwrap();
    let mut written = HashMap::new();
    written.insert("FIELD0".to_string(), "a".to_string());
    adapter.insert("usertable", "user1", &written).await;
    adapter.delete("usertable", "user1").await;
    adapter.cleanup().await;

    let mut adapter = config.connect().await.unwrap();
    let (status, result) = adapter.read("usertable", "user1", None).await;
    assert!(status.is_ok());
    assert!(result.is_empty());
}
