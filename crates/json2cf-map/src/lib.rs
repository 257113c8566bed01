//! Field mapping and reconciliation for json2cf
//!
//! Decides which record fields change when a record is synchronized against
//! a JSON document fetched from an external API:
//!
//! - **path**: dotted references (`address.zip`) resolved into the fetched tree
//! - **coerce**: text and numeric cleaning per declared coercion kind
//! - **subform**: row encoding for repeating sub-field values
//! - **rule**: mapping rules and the profile that orders them
//! - **reconcile**: the per-record change computation
//!
//! Nothing in this crate performs I/O or logs; it is safe to call from any
//! number of threads at once.
//!
//! # Example
//!
//! ```
//! use json2cf_map::{CoercionKind, FieldSet, MappingRule, reconcile};
//! use serde_json::json;
//!
//! let rules = vec![MappingRule::new("zip", "address.zip", CoercionKind::String)];
//! let fields = FieldSet::from_values([("zip", "1000")]);
//!
//! let outcome = reconcile(&rules, fields, &json!({"address": {"zip": "1050"}}));
//! assert!(outcome.changed);
//! assert_eq!(outcome.fields.value("zip"), Some("1050"));
//! ```

pub mod coerce;
pub mod error;
pub mod fields;
pub mod path;
pub mod reconcile;
pub mod rule;
pub mod subform;

pub use coerce::{clean_float, clean_text, coerce};
pub use error::{Error, Result};
pub use fields::{FieldSet, FieldValue};
pub use path::resolve;
pub use reconcile::{FieldChange, Reconciliation, reconcile};
pub use rule::{CoercionKind, MappingRule, Profile};
