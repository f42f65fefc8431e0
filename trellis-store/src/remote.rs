//! Remote store client.
//!
//! Connects to a live runtime service and ships one request frame per
//! program, awaiting one response frame before returning. The service's
//! own transport, pooling, and retry policy are its business; a failure
//! here propagates as-is once the call unblocks.

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info};
use trellis_core::{Outcome, TxnProgram};

use crate::error::{Result, StoreError};
use crate::wire::{self, Request, Response};
use crate::TransactionalStore;

/// Client connection to a remote transactional runtime.
pub struct RemoteStore {
    stream: TcpStream,
}

impl RemoteStore {
    /// Connect to a runtime service.
    ///
    /// # Arguments
    /// * `addr` - Service address (e.g., "127.0.0.1:7878")
    pub async fn connect(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        let stream = TcpStream::connect(&addr).await.map_err(|e| {
            StoreError::Connection(format!("failed to connect to {}: {}", addr, e))
        })?;
        stream
            .set_nodelay(true)
            .map_err(|e| StoreError::Connection(format!("set_nodelay: {}", e)))?;
        info!(%addr, "connected to runtime service");
        Ok(Self { stream })
    }
}

#[async_trait]
impl TransactionalStore for RemoteStore {
    async fn execute(&mut self, program: &TxnProgram) -> Result<Outcome> {
        wire::write_frame(&mut self.stream, &Request::Execute(program.clone())).await?;
        match wire::read_frame::<_, Response>(&mut self.stream).await? {
            Response::Outcome(outcome) => Ok(outcome),
            Response::Error(message) => {
                debug!(%message, "runtime failed program");
                Err(StoreError::Runtime(message))
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        // Best effort: the service may already be gone.
        let _ = wire::write_frame(&mut self.stream, &Request::Close).await;
        self.stream.shutdown().await?;
        info!("closed runtime connection");
        Ok(())
    }
}
