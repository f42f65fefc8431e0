//! Transactional store implementations for Trellis.
//!
//! The driver submits one program at a time through the
//! [`TransactionalStore`] capability and blocks on the outcome. Two
//! interchangeable implementations are provided: [`EmbeddedStore`], an
//! in-process runtime with explicit snapshot persistence, and
//! [`RemoteStore`], a client to a live runtime service. Store handles are
//! thread-confined: one handle per worker, no synchronization inside.

pub mod embedded;
pub mod error;
pub mod remote;
pub mod wire;

pub use embedded::EmbeddedStore;
pub use error::{Result, StoreError};
pub use remote::RemoteStore;

use async_trait::async_trait;
use trellis_core::{Outcome, TxnProgram};

/// The external transactional runtime, as seen from this layer.
///
/// `execute` submits one atomic program and completes only when the
/// runtime has a result or a failure for it; there is no retry, no
/// timeout, and no way to abort a submitted program. `close` releases the
/// underlying connection or persists shutdown state.
#[async_trait]
pub trait TransactionalStore: Send {
    /// Submit one program for atomic execution and await its outcome.
    async fn execute(&mut self, program: &TxnProgram) -> Result<Outcome>;

    /// Release the store. Further calls after a close are a caller bug;
    /// implementations may fail them.
    async fn close(&mut self) -> Result<()>;
}

#[async_trait]
impl<S: TransactionalStore + ?Sized> TransactionalStore for Box<S> {
    async fn execute(&mut self, program: &TxnProgram) -> Result<Outcome> {
        (**self).execute(program).await
    }

    async fn close(&mut self) -> Result<()> {
        (**self).close().await
    }
}
