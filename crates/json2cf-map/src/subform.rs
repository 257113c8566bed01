//! Subform row encoding
//!
//! A subform field stores its repeating values as a JSON object of indexed
//! rows, each row holding one sub-field keyed `field<id>`:
//!
//! ```text
//! {"row0":{"field6":"mailto:a@b.com"},"row1":{"field6":"mailto:c@d.com"}}
//! ```
//!
//! Rows are object-keyed rather than an array because that is what the record
//! storage's subform reader expects.

use serde_json::{Map, Value};

fn row_key(index: usize) -> String {
    format!("row{index}")
}

fn sub_field_key(field_id: &str) -> String {
    format!("field{field_id}")
}

/// Build the row object for `values`, one row per value in input order.
pub fn encode_rows<S: AsRef<str>>(values: &[S], field_id: &str, protocol: &str) -> Map<String, Value> {
    let key = sub_field_key(field_id);

    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let mut row = Map::new();
            row.insert(key.clone(), Value::String(format!("{protocol}{}", value.as_ref())));
            (row_key(index), Value::Object(row))
        })
        .collect()
}

/// Encode `values` as a serialized subform.
///
/// ```
/// use json2cf_map::subform::encode;
///
/// assert_eq!(encode::<&str>(&[], "6", "mailto:"), "{}");
/// assert_eq!(
///     encode(&["x@y.com"], "6", "mailto:"),
///     r#"{"row0":{"field6":"mailto:x@y.com"}}"#
/// );
/// ```
pub fn encode<S: AsRef<str>>(values: &[S], field_id: &str, protocol: &str) -> String {
    Value::Object(encode_rows(values, field_id, protocol)).to_string()
}

/// Read the values back out of a serialized subform.
///
/// Rows are returned in stored order with `protocol` removed where present.
/// Rows lacking the sub-field are ignored. Returns `None` when `encoded` is
/// not a JSON object of row objects.
pub fn decode(encoded: &str, field_id: &str, protocol: &str) -> Option<Vec<String>> {
    let Value::Object(rows) = serde_json::from_str::<Value>(encoded).ok()? else {
        return None;
    };
    let key = sub_field_key(field_id);

    let mut values = Vec::with_capacity(rows.len());
    for row in rows.values() {
        let row = row.as_object()?;
        if let Some(value) = row.get(&key).and_then(Value::as_str) {
            values.push(value.strip_prefix(protocol).unwrap_or(value).to_string());
        }
    }

    Some(values)
}
