//! Synchronization driver for json2cf
//!
//! Sits above the mapping core and the record store and implements one
//! synchronization run:
//!
//! - **config**: task configuration read from TOML
//! - **profile**: loading the mapping profile named by the task
//! - **fetch**: URL templating, the HTTP collaborator, payload validation
//! - **events**: post-save notifications
//! - **sync**: the per-record driver and its report
//!
//! ```text
//!                json2cf-cli
//!                     |
//!                json2cf-sync
//!                 /         \
//!        json2cf-map    json2cf-store
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod fetch;
pub mod profile;
pub mod sync;

pub use config::SyncConfig;
pub use error::{Error, Result};
pub use events::{EventSink, LogEventSink, SavedEvent};
pub use fetch::{FetchResponse, HttpFetcher, PayloadFetcher, parse_payload, render_url};
pub use profile::load_profile;
pub use sync::{OutcomeStatus, RecordOutcome, SyncEngine, SyncOptions, SyncReport};
