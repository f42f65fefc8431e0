//! Framed wire codec for the remote store.
//!
//! One request frame per program, one response frame per outcome. Frames
//! are a u32 big-endian length prefix followed by a bincode payload,
//! bounded by `MAX_FRAME_LEN`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use trellis_core::{Outcome, TxnProgram};

use crate::error::{Result, StoreError};

/// Upper bound on a single frame's payload.
pub const MAX_FRAME_LEN: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Request {
    /// Execute one program atomically.
    Execute(TxnProgram),
    /// The client is done with this connection.
    Close,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Response {
    /// The program committed.
    Outcome(Outcome),
    /// The runtime failed the program.
    Error(String),
}

pub async fn write_frame<W, T>(writer: &mut W, message: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let payload =
        bincode::serialize(message).map_err(|e| StoreError::Codec(e.to_string()))?;
    if payload.len() > MAX_FRAME_LEN {
        return Err(StoreError::Protocol(format!(
            "frame of {} bytes exceeds limit",
            payload.len()
        )));
    }
    writer.write_u32(payload.len() as u32).await?;
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}

pub async fn read_frame<R, T>(reader: &mut R) -> Result<T>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let len = reader.read_u32().await? as usize;
    if len > MAX_FRAME_LEN {
        return Err(StoreError::Protocol(format!(
            "frame of {} bytes exceeds limit",
            len
        )));
    }
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    bincode::deserialize(&payload).map_err(|e| StoreError::Codec(e.to_string()))
}
