//! Tests for subform encoding

use json2cf_map::subform::{decode, encode};
use serde_json::{Value, json};

#[test]
fn test_encode_empty_has_no_rows() {
    let encoded = encode::<&str>(&[], "6", "mailto:");
    assert_eq!(serde_json::from_str::<Value>(&encoded).unwrap(), json!({}));
}

#[test]
fn test_encode_two_emails() {
    let encoded = encode(&["x@y.com", "z@y.com"], "6", "mailto:");
    assert_eq!(
        serde_json::from_str::<Value>(&encoded).unwrap(),
        json!({
            "row0": {"field6": "mailto:x@y.com"},
            "row1": {"field6": "mailto:z@y.com"}
        })
    );
}

#[test]
fn test_encode_snapshot() {
    let encoded = encode(&["https://a.be", "https://b.be", "https://c.be"], "12", "");
    insta::assert_snapshot!(encoded, @r#"{"row0":{"field12":"https://a.be"},"row1":{"field12":"https://b.be"},"row2":{"field12":"https://c.be"}}"#);
}

#[test]
fn test_encoded_rows_decode_in_order() {
    let values = ["c@y.com", "a@y.com", "b@y.com"];
    let encoded = encode(&values, "6", "mailto:");
    assert_eq!(decode(&encoded, "6", "mailto:").unwrap(), values);
}

#[test]
fn test_decode_ignores_other_sub_fields() {
    let encoded = r#"{"row0":{"field7":"x"},"row1":{"field6":"mailto:y@z.com"}}"#;
    assert_eq!(decode(encoded, "6", "mailto:").unwrap(), vec!["y@z.com"]);
}
