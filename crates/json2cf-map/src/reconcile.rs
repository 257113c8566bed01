//! Per-record reconciliation
//!
//! Rules are applied in profile order against a running copy of the record's
//! fields, so when two rules target the same field the last one to fire wins.
//! A rule that cannot apply is a no-op; reconciliation never fails.

use serde::Serialize;
use serde_json::Value;

use crate::coerce::coerce;
use crate::fields::FieldSet;
use crate::path;
use crate::rule::{CoercionKind, MappingRule};

/// One field value replaced during reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub field: String,
    /// Kind of the rule that made the change
    pub kind: CoercionKind,
    pub previous: String,
    pub value: String,
}

/// Result of reconciling one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The record's fields with every fired rule applied
    pub fields: FieldSet,
    /// Whether any rule replaced a value
    pub changed: bool,
    /// Replacements in the order they were made
    pub changes: Vec<FieldChange>,
}

impl Reconciliation {
    /// Names of changed fields, first change first, without repeats
    pub fn changed_fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.changes.len());
        for change in &self.changes {
            if !names.contains(&change.field.as_str()) {
                names.push(&change.field);
            }
        }
        names
    }
}

/// Reconcile `current` against a fetched document.
///
/// For each rule in order:
/// 1. skip if the record has no field named `field_name`
/// 2. resolve `external` in `fetched`; skip if absent or `null`
/// 3. skip subform kinds when the field has no sub-field id to encode into
/// 4. coerce, and replace the field value when it differs
pub fn reconcile(rules: &[MappingRule], current: FieldSet, fetched: &Value) -> Reconciliation {
    let mut fields = current;
    let mut changes = Vec::new();

    for rule in rules {
        let coerced = {
            let Some(field) = fields.get(&rule.field_name) else {
                continue;
            };

            let Some(raw) = path::resolve(fetched, &rule.external) else {
                continue;
            };
            if raw.is_null() {
                continue;
            }

            let target_field_id = if rule.kind.is_subform() {
                match field.subform_field.as_deref() {
                    Some(id) => id,
                    None => continue,
                }
            } else {
                ""
            };

            let coerced = coerce(raw, rule.kind, target_field_id);
            if coerced == field.value {
                continue;
            }
            coerced
        };

        if let Some(previous) = fields.replace_value(&rule.field_name, coerced.clone()) {
            changes.push(FieldChange {
                field: rule.field_name.clone(),
                kind: rule.kind,
                previous,
                value: coerced,
            });
        }
    }

    Reconciliation {
        changed: !changes.is_empty(),
        fields,
        changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldValue;
    use serde_json::json;

    #[test]
    fn test_last_rule_wins_for_same_field() {
        let rules = vec![
            MappingRule::new("city", "address.cityFr", CoercionKind::String),
            MappingRule::new("city", "address.cityNl", CoercionKind::String),
        ];
        let fields = FieldSet::from_values([("city", "")]);
        let fetched = json!({"address": {"cityFr": "Bruxelles", "cityNl": "Brussel"}});

        let outcome = reconcile(&rules, fields, &fetched);

        assert_eq!(outcome.fields.value("city"), Some("Brussel"));
        assert_eq!(outcome.changes.len(), 2);
        assert_eq!(outcome.changes[1].previous, "Bruxelles");
        assert_eq!(outcome.changed_fields(), vec!["city"]);
    }

    #[test]
    fn test_changed_stays_set_when_later_rule_restores_value() {
        let rules = vec![
            MappingRule::new("zip", "new", CoercionKind::String),
            MappingRule::new("zip", "old", CoercionKind::String),
        ];
        let fields = FieldSet::from_values([("zip", "1000")]);

        let outcome = reconcile(&rules, fields, &json!({"new": "1050", "old": "1000"}));

        assert!(outcome.changed);
        assert_eq!(outcome.fields.value("zip"), Some("1000"));
    }

    #[test]
    fn test_changes_carry_the_kind_of_their_rule() {
        let rules = vec![
            MappingRule::new("emails", "emailFr", CoercionKind::ArrayEmails),
            MappingRule::new("emails", "contact", CoercionKind::String),
        ];
        let mut fields = FieldSet::new();
        fields.insert("emails", FieldValue::subform("", "6"));

        let outcome = reconcile(
            &rules,
            fields,
            &json!({"emailFr": ["a@b.com"], "contact": "desk"}),
        );

        let kinds: Vec<CoercionKind> = outcome.changes.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CoercionKind::ArrayEmails, CoercionKind::String]);
        assert_eq!(outcome.fields.value("emails"), Some("desk"));
    }

    #[test]
    fn test_null_is_treated_as_absent() {
        let rules = vec![MappingRule::new("zip", "zip", CoercionKind::String)];
        let fields = FieldSet::from_values([("zip", "1000")]);

        let outcome = reconcile(&rules, fields, &json!({"zip": null}));

        assert!(!outcome.changed);
        assert_eq!(outcome.fields.value("zip"), Some("1000"));
    }

    #[test]
    fn test_subform_rule_without_sub_field_is_noop() {
        let rules = vec![MappingRule::new("emails", "emails", CoercionKind::ArrayEmails)];
        let mut fields = FieldSet::new();
        fields.insert("emails", FieldValue::new(""));

        let outcome = reconcile(&rules, fields.clone(), &json!({"emails": ["a@b.com"]}));

        assert!(!outcome.changed);
        assert_eq!(outcome.fields, fields);
    }
}
