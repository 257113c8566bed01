//! Per-record synchronization
//!
//! - **engine**: drives one run over every record in the configured categories
//! - **report**: per-record outcomes and run totals

mod engine;
mod report;

pub use engine::{SyncEngine, SyncOptions};
pub use report::{OutcomeStatus, RecordOutcome, SyncReport};
