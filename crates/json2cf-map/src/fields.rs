//! Record field values as seen by reconciliation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current content of one record field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    /// Raw stored content
    #[serde(default)]
    pub value: String,
    /// For subform fields, the id of the sub-field each row stores into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subform_field: Option<String>,
}

impl FieldValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            subform_field: None,
        }
    }

    /// A subform field whose rows store into sub-field `subform_field`
    pub fn subform(value: impl Into<String>, subform_field: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            subform_field: Some(subform_field.into()),
        }
    }
}

/// Field name to value mapping for one record
///
/// Keys are fixed at construction as far as reconciliation is concerned:
/// [`FieldSet::replace_value`] only ever touches names already present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet {
    fields: BTreeMap<String, FieldValue>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set of plain (non-subform) fields
    pub fn from_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        values
            .into_iter()
            .map(|(name, value)| (name.into(), FieldValue::new(value)))
            .collect()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// The raw content of `name`, if the field exists
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|field| field.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Replace the content of an existing field, returning the previous content.
    ///
    /// Returns `None` and leaves the set untouched when `name` is not present.
    pub fn replace_value(&mut self, name: &str, value: String) -> Option<String> {
        let field = self.fields.get_mut(name)?;
        Some(std::mem::replace(&mut field.value, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }
}

impl FromIterator<(String, FieldValue)> for FieldSet {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
