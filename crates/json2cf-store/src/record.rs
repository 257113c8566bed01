//! Content record model

use chrono::{DateTime, Utc};
use json2cf_map::FieldSet;
use serde::{Deserialize, Serialize};

/// One content item and its custom fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    pub category_id: u32,
    /// Last modification stamp, set when a sync changes the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Status tag ids
    #[serde(default)]
    pub tags: Vec<u32>,
    #[serde(default)]
    pub fields: FieldSet,
}

impl Record {
    pub fn new(id: u64, title: impl Into<String>, category_id: u32) -> Self {
        Self {
            id,
            title: title.into(),
            category_id,
            modified: None,
            tags: Vec::new(),
            fields: FieldSet::new(),
        }
    }

    /// Builder-style replacement of the field set
    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    /// Non-empty content of field `name`
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields.value(name).filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use json2cf_map::FieldValue;

    #[test]
    fn test_minimal_document_parses() {
        let record: Record = serde_json::from_str(r#"{"id": 7, "category_id": 9}"#).unwrap();

        assert_eq!(record, Record::new(7, "", 9));
    }

    #[test]
    fn test_field_value_ignores_empty_content() {
        let mut fields = FieldSet::from_values([("fetch-url-id", "")]);
        fields.insert("emails", FieldValue::subform("{}", "6"));
        let record = Record::new(1, "Org", 9).with_fields(fields);

        assert_eq!(record.field_value("fetch-url-id"), None);
        assert_eq!(record.field_value("emails"), Some("{}"));
        assert_eq!(record.field_value("missing"), None);
    }
}
