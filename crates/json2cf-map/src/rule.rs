//! Mapping rules and profiles
//!
//! A profile is the ordered list of rules loaded for one synchronization run.
//! Its document form is a JSON array:
//!
//! ```json
//! [
//!   { "fieldName": "zip",    "external": "address.zip", "as": "string" },
//!   { "fieldName": "emails", "external": "emailFr",     "as": "array.emails" }
//! ]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// How a resolved external value is turned into a field value
///
/// Unknown names read from a profile fall back to [`CoercionKind::String`],
/// and so does an `as` that is not a string at all (`null`, numbers, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "&'static str")]
pub enum CoercionKind {
    /// Plain text cleaning
    #[default]
    String,
    /// Dates are stored as cleaned text
    Date,
    /// Numeric cleaning
    Float,
    /// Subform rows prefixed with `mailto:`
    ArrayEmails,
    /// Subform rows stored as given
    ArrayWebsites,
}

impl CoercionKind {
    /// The name used in profile documents
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Date => "date",
            Self::Float => "float",
            Self::ArrayEmails => "array.emails",
            Self::ArrayWebsites => "array.websites",
        }
    }

    /// Row prefix for subform kinds, `None` for scalar kinds
    pub fn subform_protocol(self) -> Option<&'static str> {
        match self {
            Self::ArrayEmails => Some("mailto:"),
            Self::ArrayWebsites => Some(""),
            Self::String | Self::Date | Self::Float => None,
        }
    }

    /// Whether values of this kind are encoded as subform rows
    pub fn is_subform(self) -> bool {
        self.subform_protocol().is_some()
    }
}

impl From<&str> for CoercionKind {
    fn from(name: &str) -> Self {
        match name {
            "date" => Self::Date,
            "float" => Self::Float,
            "array.emails" => Self::ArrayEmails,
            "array.websites" => Self::ArrayWebsites,
            _ => Self::String,
        }
    }
}

impl From<String> for CoercionKind {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Value> for CoercionKind {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Self::from(name.as_str()),
            _ => Self::String,
        }
    }
}

impl From<CoercionKind> for &'static str {
    fn from(kind: CoercionKind) -> Self {
        kind.as_str()
    }
}

impl fmt::Display for CoercionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single mapping instruction: copy `external` into `field_name` as `kind`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRule {
    /// Local field the rule writes to
    #[serde(rename = "fieldName")]
    pub field_name: String,
    /// Dotted reference into the fetched document
    pub external: String,
    /// Coercion applied before comparison
    #[serde(rename = "as", default)]
    pub kind: CoercionKind,
}

impl MappingRule {
    pub fn new(
        field_name: impl Into<String>,
        external: impl Into<String>,
        kind: CoercionKind,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            external: external.into(),
            kind,
        }
    }

    fn is_well_formed(&self) -> bool {
        !self.field_name.is_empty() && crate::path::parse_path(&self.external).is_some()
    }
}

/// Ordered list of mapping rules
///
/// Read-only once loaded. Malformed entries in the source document are
/// dropped at parse time and counted in [`Profile::skipped`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    rules: Vec<MappingRule>,
    skipped: usize,
}

impl Profile {
    /// Create a profile from already-built rules
    pub fn new(rules: Vec<MappingRule>) -> Self {
        Self { rules, skipped: 0 }
    }

    /// Parse a profile document
    ///
    /// The document must be a JSON array. Entries that are not objects, lack
    /// `fieldName` or `external`, or carry an empty field name or unusable
    /// path are skipped rather than failing the whole profile.
    ///
    /// ```
    /// use json2cf_map::{CoercionKind, Profile};
    ///
    /// let profile = Profile::parse(r#"[
    ///     {"fieldName": "zip", "external": "address.zip", "as": "string"},
    ///     {"fieldName": "lat", "external": "address.lat", "as": "float"},
    ///     {"external": "orphan"}
    /// ]"#).unwrap();
    ///
    /// assert_eq!(profile.len(), 2);
    /// assert_eq!(profile.skipped(), 1);
    /// assert_eq!(profile.rules()[1].kind, CoercionKind::Float);
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(source)?;

        let Value::Array(entries) = document else {
            return Err(Error::NotAList {
                found: json_type_name(&document).to_string(),
            });
        };

        let mut rules = Vec::with_capacity(entries.len());
        let mut skipped = 0;

        for entry in entries {
            match serde_json::from_value::<MappingRule>(entry) {
                Ok(rule) if rule.is_well_formed() => rules.push(rule),
                _ => skipped += 1,
            }
        }

        Ok(Self { rules, skipped })
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    /// Number of document entries dropped as malformed
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a Profile {
    type Item = &'a MappingRule;
    type IntoIter = std::slice::Iter<'a, MappingRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
