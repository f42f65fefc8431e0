use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("protocol violation: {0}")]
    Protocol(String),

    #[error("runtime failure: {0}")]
    Runtime(String),

    #[error(transparent)]
    Core(#[from] trellis_core::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
