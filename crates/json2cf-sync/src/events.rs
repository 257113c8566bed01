//! Post-save notifications

use chrono::{DateTime, Utc};
use json2cf_map::FieldSet;
use serde::Serialize;

/// Context name carried by every save notification
pub const RECORD_CONTEXT: &str = "json2cf.record";

/// Emitted after a changed record has been saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedEvent {
    pub context: &'static str,
    pub record_id: u64,
    pub title: String,
    /// Always false: synchronization only updates existing records
    pub is_new: bool,
    pub modified: DateTime<Utc>,
    pub changed_fields: Vec<String>,
    pub fields: FieldSet,
}

/// Receiver of post-save notifications
pub trait EventSink {
    fn after_save(&self, event: &SavedEvent);
}

/// Sink that records each notification as a log event
#[derive(Debug, Default)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn after_save(&self, event: &SavedEvent) {
        tracing::info!(
            context = event.context,
            record_id = event.record_id,
            title = %event.title,
            changed = ?event.changed_fields,
            "Record saved"
        );
    }
}
