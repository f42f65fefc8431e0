//! Core model for the Trellis benchmark driver.
//!
//! A logical record (table, key, field -> value) is flattened onto a flat
//! key-value namespace, and every per-field operation of one record access
//! is packed into a single transaction program that the external runtime
//! executes atomically. This crate holds the pure pieces of that scheme:
//! key encoding, program construction, and transcript decoding. It performs
//! no I/O.

pub mod error;
pub mod key;
pub mod program;
pub mod record;

pub use error::{Error, Result};
pub use key::{encode_key, DEFAULT_FIELDS, FIELD_SEPARATOR, KEY_SEPARATOR};
pub use program::{Outcome, Step, TxnProgram};
pub use record::{decode_read, delete_program, read_program, write_program};
