use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("value for field {field} contains the reserved field separator")]
    SeparatorInValue { field: String },

    #[error("malformed transcript: expected {expected} segments, got {actual}")]
    MalformedTranscript { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
