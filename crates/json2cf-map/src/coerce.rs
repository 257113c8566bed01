//! Value coercion per declared kind
//!
//! Every function here is pure: the same input always yields the same output.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::rule::CoercionKind;
use crate::subform;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<>]*>").unwrap());

static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").unwrap());

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9]+(\.[0-9]+)?([eE][-+]?[0-9]+)?").unwrap());

/// Numeric cleaning result for input with no number in it
pub const FLOAT_FALLBACK: &str = "0";

/// Coerce a resolved external value into field content.
///
/// `target_field_id` is only consulted by subform kinds, where it names the
/// sub-field each row stores into.
///
/// ```
/// use json2cf_map::{CoercionKind, coerce};
/// use serde_json::json;
///
/// assert_eq!(coerce(&json!("<b>Rue</b> Neuve"), CoercionKind::String, ""), "Rue Neuve");
/// assert_eq!(coerce(&json!("50.85 N"), CoercionKind::Float, ""), "50.85");
/// assert_eq!(
///     coerce(&json!(["a@b.com"]), CoercionKind::ArrayEmails, "6"),
///     r#"{"row0":{"field6":"mailto:a@b.com"}}"#
/// );
/// ```
pub fn coerce(raw: &Value, kind: CoercionKind, target_field_id: &str) -> String {
    match kind {
        CoercionKind::String | CoercionKind::Date => clean_text(&scalar_text(raw)),
        CoercionKind::Float => clean_float(raw),
        CoercionKind::ArrayEmails | CoercionKind::ArrayWebsites => {
            let protocol = kind.subform_protocol().unwrap_or_default();
            let values: Vec<String> = sequence(raw)
                .map(|element| clean_text(&scalar_text(element)))
                .collect();
            subform::encode(&values, target_field_id, protocol)
        }
    }
}

/// Clean text for storage as plain field content.
///
/// Markup tags are removed, character references decoded, tags exposed by
/// decoding removed again, and control characters other than tab and line
/// breaks dropped.
pub fn clean_text(input: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(input, "");
    let decoded = decode_entities(&stripped);
    let stripped = TAG_PATTERN.replace_all(&decoded, "");

    stripped
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Clean a value as a number.
///
/// JSON numbers are used as they are. Anything else is stringified and its
/// first numeric run is taken; no numeric run yields [`FLOAT_FALLBACK`].
pub fn clean_float(raw: &Value) -> String {
    let number = match raw {
        Value::Number(n) => n.as_f64(),
        other => {
            let text = scalar_text(other);
            NUMBER_PATTERN
                .find(&text)
                .and_then(|m| m.as_str().parse::<f64>().ok())
        }
    };

    match number {
        Some(n) if n.is_finite() => format_float(n),
        _ => FLOAT_FALLBACK.to_string(),
    }
}

fn format_float(n: f64) -> String {
    // -0.0 would otherwise print as "-0"
    if n == 0.0 {
        return FLOAT_FALLBACK.to_string();
    }
    n.to_string()
}

/// Text form of a raw value before cleaning.
///
/// Booleans follow the host's string cast (`"1"` / `""`); containers are
/// rendered as compact JSON.
fn scalar_text(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => raw.to_string(),
    }
}

/// The elements of a value treated as a sequence.
///
/// Arrays yield their non-null elements in order, objects their member
/// values, `null` nothing, and a lone scalar itself.
fn sequence(raw: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match raw {
        Value::Null => Box::new(std::iter::empty()),
        Value::Array(items) => Box::new(items.iter().filter(|item| !item.is_null())),
        Value::Object(members) => Box::new(members.values().filter(|item| !item.is_null())),
        scalar => Box::new(std::iter::once(scalar)),
    }
}

fn decode_entities(input: &str) -> String {
    ENTITY_PATTERN
        .replace_all(input, |caps: &Captures<'_>| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => numeric_reference(name),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn numeric_reference(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let hex = digits
        .strip_prefix('x')
        .or_else(|| digits.strip_prefix('X'));
    let code = match hex {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}
