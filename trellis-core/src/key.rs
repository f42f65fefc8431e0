//! Flat-key encoding.
//!
//! Every (table, key, field) triple maps to one key in the runtime's flat
//! namespace. The mapping is injective as long as the key separator does
//! not occur in any of the three components; callers own that contract,
//! encoding itself accepts any input (including empty strings).

/// Separator between table, record key, and field name in a flat key.
pub const KEY_SEPARATOR: char = '$';

/// Separator between field values in a read transcript. Values written
/// through this layer must not contain it; `record::write_program` rejects
/// them before submission.
pub const FIELD_SEPARATOR: char = '\0';

/// The canonical field set used when a caller does not name fields.
///
/// Read defaulting and delete both operate over this exact set, in this
/// exact order — delete is an insert of empty values for these fields, so
/// the two paths must never drift apart.
pub const DEFAULT_FIELDS: [&str; 10] = [
    "FIELD0", "FIELD1", "FIELD2", "FIELD3", "FIELD4",
    "FIELD5", "FIELD6", "FIELD7", "FIELD8", "FIELD9",
];

/// Encode a (table, key, field) triple as a flat namespace key.
///
/// Pure and total: any combination of inputs produces a key. Every code
/// path that touches the same logical field must go through this function
/// so that writes are visible to subsequent reads under the same key.
///
/// # Example
/// ```
/// use trellis_core::encode_key;
///
/// assert_eq!(encode_key("usertable", "user1", "FIELD0"), "usertable$user1$FIELD0");
/// ```
pub fn encode_key(table: &str, key: &str, field: &str) -> String {
    let mut out = String::with_capacity(table.len() + key.len() + field.len() + 2);
    out.push_str(table);
    out.push(KEY_SEPARATOR);
    out.push_str(key);
    out.push(KEY_SEPARATOR);
    out.push_str(field);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_key_layout() {
        assert_eq!(encode_key("usertable", "user1", "FIELD0"), "usertable$user1$FIELD0");
    }

    #[test]
    fn test_encode_key_accepts_empty_components() {
        assert_eq!(encode_key("", "", ""), "$$");
        assert_eq!(encode_key("t", "", "f"), "t$$f");
    }

    #[test]
    fn test_encode_key_deterministic() {
        assert_eq!(
            encode_key("orders", "o-42", "FIELD3"),
            encode_key("orders", "o-42", "FIELD3")
        );
    }

    #[test]
    fn test_default_fields_are_ten_and_unique() {
        assert_eq!(DEFAULT_FIELDS.len(), 10);
        let mut sorted = DEFAULT_FIELDS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 10);
    }
}
