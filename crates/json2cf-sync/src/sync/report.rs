//! Outcome types for a synchronization run

use serde::{Deserialize, Serialize};

use json2cf_store::Record;

/// What happened to one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// At least one field changed and the record was saved
    Updated,
    /// Nothing changed; the record was re-tagged
    Unchanged,
    /// The record is not set up for synchronization
    Skipped,
    /// Fetching, parsing, or saving failed
    Failed,
}

/// Outcome for a single record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub record_id: u64,
    pub title: String,
    pub status: OutcomeStatus,
    /// Fields whose value changed, in profile order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changed_fields: Vec<String>,
    /// Reason for a skip or failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecordOutcome {
    fn new(record: &Record, status: OutcomeStatus) -> Self {
        Self {
            record_id: record.id,
            title: record.title.clone(),
            status,
            changed_fields: Vec::new(),
            message: None,
        }
    }

    pub fn updated(record: &Record, changed_fields: Vec<String>) -> Self {
        Self {
            changed_fields,
            ..Self::new(record, OutcomeStatus::Updated)
        }
    }

    pub fn unchanged(record: &Record) -> Self {
        Self::new(record, OutcomeStatus::Unchanged)
    }

    pub fn skipped(record: &Record, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(record, OutcomeStatus::Skipped)
        }
    }

    pub fn failed(record: &Record, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(record, OutcomeStatus::Failed)
        }
    }
}

/// Report from a synchronization run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether the run was simulated without saving
    pub dry_run: bool,
    /// One entry per processed record, in record id order
    pub outcomes: Vec<RecordOutcome>,
}

impl SyncReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of records with the given status
    pub fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// True when no record failed
    pub fn success(&self) -> bool {
        self.count(OutcomeStatus::Failed) == 0
    }

    /// Outcomes with the given status
    pub fn with_status(&self, status: OutcomeStatus) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(move |o| o.status == status)
    }
}
