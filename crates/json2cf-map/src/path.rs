//! Dotted path resolution into fetched JSON
//!
//! A rule's external reference names a chain of object keys separated by
//! dots. Array indexing is not part of the syntax: every segment addresses
//! an object member, and a missing member at any depth means the value is
//! absent.
//!
//! # Examples
//!
//! ```
//! use json2cf_map::path::resolve;
//! use serde_json::json;
//!
//! let tree = json!({"a": {"b": {"c": 7}}});
//! assert_eq!(resolve(&tree, "a.b.c"), Some(&json!(7)));
//! assert_eq!(resolve(&tree, "a.x.c"), None);
//! ```

use serde_json::Value;

/// Split a dotted reference into its key segments.
///
/// Returns `None` for references with an empty segment (`""`, `"a..b"`,
/// `".a"`), which cannot name any member.
///
/// ```
/// use json2cf_map::path::parse_path;
///
/// assert_eq!(parse_path("address.zip"), Some(vec!["address", "zip"]));
/// assert_eq!(parse_path("zip"), Some(vec!["zip"]));
/// assert_eq!(parse_path("address..zip"), None);
/// ```
pub fn parse_path(path: &str) -> Option<Vec<&str>> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return None;
    }
    Some(segments)
}

/// Get the value under `segments`, descending one object member per segment.
///
/// The raw value is returned untouched, including `null`.
pub fn get_at_path<'a>(value: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(value);
    };

    let next_value = value.as_object()?.get(*first)?;

    get_at_path(next_value, rest)
}

/// Resolve a dotted reference against a fetched tree.
///
/// Malformed references resolve to `None` like any other miss.
pub fn resolve<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let segments = parse_path(path)?;
    get_at_path(tree, &segments)
}
