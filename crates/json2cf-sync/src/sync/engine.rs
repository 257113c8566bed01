//! SyncEngine implementation
//!
//! The SyncEngine walks every record in the configured categories, fetches
//! the record's external document, reconciles the record's fields against it,
//! and hands the result back to the record store.

use chrono::{DateTime, Utc};
use json2cf_map::{Profile, reconcile};
use json2cf_store::{Record, RecordStore};

use crate::Result;
use crate::config::SyncConfig;
use crate::events::{EventSink, RECORD_CONTEXT, SavedEvent};
use crate::fetch::{PayloadFetcher, parse_payload, render_url};
use crate::profile::load_profile;

use super::report::{OutcomeStatus, RecordOutcome, SyncReport};

/// Options for a synchronization run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// If true, reconcile every record but save nothing and emit no events.
    pub dry_run: bool,
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Engine for one synchronization run
///
/// Every collaborator is injected: where records live, how documents are
/// fetched, who hears about saves, and what time it is.
pub struct SyncEngine<'a> {
    config: &'a SyncConfig,
    store: &'a dyn RecordStore,
    fetcher: &'a dyn PayloadFetcher,
    events: &'a dyn EventSink,
    clock: Clock,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        config: &'a SyncConfig,
        store: &'a dyn RecordStore,
        fetcher: &'a dyn PayloadFetcher,
        events: &'a dyn EventSink,
    ) -> Self {
        Self {
            config,
            store,
            fetcher,
            events,
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the clock used for modification stamps
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Run a full synchronization
    ///
    /// # Errors
    ///
    /// Fails before any record is touched when the configuration is invalid,
    /// the profile cannot be loaded, or records cannot be listed. Failures on
    /// individual records are reported in the [`SyncReport`] instead.
    pub fn run(&self, options: &SyncOptions) -> Result<SyncReport> {
        self.config.validate()?;
        let profile = load_profile(&self.config.profile_path())?;
        self.run_with_profile(&profile, options)
    }

    /// Run a synchronization with an already loaded profile
    pub fn run_with_profile(&self, profile: &Profile, options: &SyncOptions) -> Result<SyncReport> {
        let records = self.store.list(&self.config.task.categories)?;
        tracing::info!(
            records = records.len(),
            rules = profile.len(),
            dry_run = options.dry_run,
            "Starting synchronization"
        );

        let mut report = SyncReport::new(options.dry_run);
        for record in records {
            report.push(self.sync_record(profile, record, options));
        }

        tracing::info!(
            updated = report.count(OutcomeStatus::Updated),
            unchanged = report.count(OutcomeStatus::Unchanged),
            skipped = report.count(OutcomeStatus::Skipped),
            failed = report.count(OutcomeStatus::Failed),
            "Synchronization finished"
        );

        Ok(report)
    }

    fn sync_record(&self, profile: &Profile, mut record: Record, options: &SyncOptions) -> RecordOutcome {
        if record.fields.is_empty() {
            tracing::warn!(record_id = record.id, "No fields, check your setup");
            return RecordOutcome::skipped(&record, "record has no fields");
        }

        let id_field = &self.config.fields.id_field;
        let Some(remote_id) = record.field_value(id_field) else {
            tracing::debug!(record_id = record.id, field = %id_field, "No remote id, skipping");
            return RecordOutcome::skipped(&record, format!("field '{id_field}' is empty"));
        };

        let url = render_url(&self.config.task.base_url, remote_id);

        let response = match self.fetcher.fetch(&url) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, record_id = record.id, title = %record.title, error = %e, "The URL was not reachable");
                return RecordOutcome::failed(&record, e.to_string());
            }
        };

        if !response.is_ok() {
            tracing::warn!(
                url = %url,
                record_id = record.id,
                title = %record.title,
                status = response.status,
                "The URL was not reachable"
            );
            return RecordOutcome::failed(&record, format!("{url} returned HTTP {}", response.status));
        }

        let payload = match parse_payload(&response.body) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(url = %url, record_id = record.id, error = %e, "The JSON is not valid");
                return RecordOutcome::failed(&record, format!("{url}: {e}"));
            }
        };

        let fields = std::mem::take(&mut record.fields);
        let reconciliation = reconcile(profile.rules(), fields, &payload);
        let changed_fields: Vec<String> = reconciliation
            .changed_fields()
            .into_iter()
            .map(String::from)
            .collect();
        let changed = reconciliation.changed;
        record.fields = reconciliation.fields;

        let modified = (self.clock)();
        if changed {
            record.modified = Some(modified);
            record.tags = vec![self.config.tags.changed];
        } else {
            record.tags = vec![self.config.tags.unchanged];
        }

        for change in &reconciliation.changes {
            tracing::debug!(
                record_id = record.id,
                field = %change.field,
                previous = %change.previous,
                value = %change.value,
                "Field changed"
            );
        }

        if options.dry_run {
            tracing::info!(record_id = record.id, changed, "[dry-run] Would save record");
        } else {
            if let Err(e) = self.store.save(&record) {
                tracing::error!(record_id = record.id, error = %e, "Failed to save record");
                return RecordOutcome::failed(&record, e.to_string());
            }

            if changed {
                self.events.after_save(&SavedEvent {
                    context: RECORD_CONTEXT,
                    record_id: record.id,
                    title: record.title.clone(),
                    is_new: false,
                    modified,
                    changed_fields: changed_fields.clone(),
                    fields: record.fields.clone(),
                });
            }
        }

        if changed {
            RecordOutcome::updated(&record, changed_fields)
        } else {
            RecordOutcome::unchanged(&record)
        }
    }
}
