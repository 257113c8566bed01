//! Content records and their storage for json2cf
//!
//! A record is one content item with a set of custom fields. The sync driver
//! reads records through [`RecordStore`] and writes them back after
//! reconciliation; [`FsRecordStore`] keeps one JSON document per record on
//! disk.

pub mod error;
pub mod fs;
pub mod io;
pub mod record;

pub use error::{Error, Result};
pub use fs::FsRecordStore;
pub use record::Record;

/// Read/write access to content records
pub trait RecordStore {
    /// Records belonging to any of `categories`, in id order
    fn list(&self, categories: &[u32]) -> Result<Vec<Record>>;

    /// Persist a record, replacing any stored version
    fn save(&self, record: &Record) -> Result<()>;
}
