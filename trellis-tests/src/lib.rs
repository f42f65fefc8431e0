//! Test utilities and helpers for Trellis testing.
//!
//! Provides a program-recording store for batching assertions and an
//! in-process runtime service speaking the remote wire protocol, so
//! end-to-end client tests need no external process.

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use trellis_core::{Outcome, TxnProgram};
use trellis_store::wire::{self, Request, Response};
use trellis_store::{EmbeddedStore, Result as StoreResult, TransactionalStore};

/// Store wrapper that records every submitted program before delegating
/// to an in-memory embedded store. Lets tests assert on how many programs
/// a call submitted and what steps they carried.
pub struct RecordingStore {
    inner: EmbeddedStore,
    programs: Vec<TxnProgram>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            inner: EmbeddedStore::in_memory(),
            programs: Vec::new(),
        }
    }

    /// Every program submitted so far, in submission order.
    pub fn programs(&self) -> &[TxnProgram] {
        &self.programs
    }
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionalStore for RecordingStore {
    async fn execute(&mut self, program: &TxnProgram) -> StoreResult<Outcome> {
        self.programs.push(program.clone());
        self.inner.execute(program).await
    }

    async fn close(&mut self) -> StoreResult<()> {
        self.inner.close().await
    }
}

/// Spawn an in-process runtime service backed by a volatile embedded
/// store. Connections are served one at a time; the store outlives
/// individual connections, so a reconnecting client sees earlier writes.
///
/// Returns the bound address and the serving task handle.
pub async fn spawn_runtime_service() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind service listener");
    let addr = listener.local_addr().unwrap().to_string();

    let handle = tokio::spawn(async move {
        let mut store = EmbeddedStore::in_memory();
        while let Ok((mut socket, _)) = listener.accept().await {
            loop {
                let request: Request = match wire::read_frame(&mut socket).await {
                    Ok(request) => request,
                    Err(_) => break,
                };
                match request {
                    Request::Execute(program) => {
                        let response = match store.execute(&program).await {
                            Ok(outcome) => Response::Outcome(outcome),
                            Err(e) => Response::Error(e.to_string()),
                        };
                        if wire::write_frame(&mut socket, &response).await.is_err() {
                            break;
                        }
                    }
                    Request::Close => break,
                }
            }
        }
    });

    (addr, handle)
}

/// Spawn a service that fails every program, for error-path tests.
pub async fn spawn_failing_service() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind service listener");
    let addr = listener.local_addr().unwrap().to_string();

    let handle = tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            while let Ok(request) = wire::read_frame::<_, Request>(&mut socket).await {
                match request {
                    Request::Execute(_) => {
                        let response = Response::Error("transaction aborted".to_string());
                        if wire::write_frame(&mut socket, &response).await.is_err() {
                            break;
                        }
                    }
                    Request::Close => break,
                }
            }
        }
    });

    (addr, handle)
}
