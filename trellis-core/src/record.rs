//! Record-level program construction and transcript decoding.
//!
//! One logical record access becomes exactly one program: the read path
//! interleaves a read step per field with an appended field separator, so
//! the runtime hands back a single delimited transcript; the write path
//! stages one write step per field. The decoder pairs transcript segments
//! back to field names positionally, so both sides must iterate fields in
//! the same order — the adapter resolves the field list once and passes
//! the same slice to both.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::key::{encode_key, DEFAULT_FIELDS, FIELD_SEPARATOR};
use crate::program::TxnProgram;

/// Build the program for a batched read of `fields` on one record.
///
/// The executed transcript is `v0 SEP v1 SEP ... v(n-1) SEP`, where an
/// unset flat key reads as the empty string. Zero fields produce an empty
/// program: a no-op transaction whose transcript is empty.
pub fn read_program(table: &str, key: &str, fields: &[&str]) -> TxnProgram {
    let mut program = TxnProgram::new();
    for field in fields {
        program = program
            .read(encode_key(table, key, field))
            .append(String::from(FIELD_SEPARATOR));
    }
    program
}

/// Build the program writing `values` to one record. Serves insert and
/// update alike; last write wins per field at the store.
///
/// Values containing the reserved field separator are rejected here,
/// before anything is submitted — a transcript containing them could not
/// be decoded unambiguously later.
pub fn write_program(
    table: &str,
    key: &str,
    values: &HashMap<String, String>,
) -> Result<TxnProgram> {
    let mut program = TxnProgram::new();
    for (field, value) in values {
        if value.contains(FIELD_SEPARATOR) {
            return Err(Error::SeparatorInValue {
                field: field.clone(),
            });
        }
        program = program.write(encode_key(table, key, field), value.as_str());
    }
    Ok(program)
}

/// Build the program erasing one record: the empty string is written to
/// every canonical default field. Deletion is value-erasure, not removal
/// from the store; an erased field decodes as absent on the next read.
pub fn delete_program(table: &str, key: &str) -> TxnProgram {
    let mut program = TxnProgram::new();
    for field in DEFAULT_FIELDS {
        program = program.write(encode_key(table, key, field), "");
    }
    program
}

/// Decode a read transcript back into a field -> value mapping.
///
/// `fields` must be the exact slice, in the exact order, used to build the
/// program. The transcript must hold one segment per field plus the empty
/// trailing segment left by the final separator; anything else means the
/// builder and the runtime fell out of lock-step and the call fails rather
/// than padding. Empty segments are absent (never-written or erased)
/// fields and are omitted from the result.
pub fn decode_read(transcript: &str, fields: &[&str]) -> Result<HashMap<String, String>> {
    if fields.is_empty() {
        if transcript.is_empty() {
            return Ok(HashMap::new());
        }
        return Err(Error::MalformedTranscript {
            expected: 0,
            actual: transcript.split(FIELD_SEPARATOR).count(),
        });
    }

    let body = match transcript.strip_suffix(FIELD_SEPARATOR) {
        Some(body) => body,
        None => {
            return Err(Error::MalformedTranscript {
                expected: fields.len(),
                actual: transcript.split(FIELD_SEPARATOR).count() - 1,
            })
        }
    };

    let segments: Vec<&str> = body.split(FIELD_SEPARATOR).collect();
    if segments.len() != fields.len() {
        return Err(Error::MalformedTranscript {
            expected: fields.len(),
            actual: segments.len(),
        });
    }

    let mut result = HashMap::new();
    for (field, segment) in fields.iter().zip(segments) {
        if !segment.is_empty() {
            result.insert((*field).to_string(), segment.to_string());
        }
    }
    Ok(result)
}
