//! Filesystem-backed record store
//!
//! Layout: one `<id>.json` document per record in a single directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::io::{read_text, write_atomic};
use crate::record::Record;
use crate::{Error, RecordStore, Result};

const RECORD_EXTENSION: &str = "json";

/// Record store rooted at a directory of JSON documents
#[derive(Debug, Clone)]
pub struct FsRecordStore {
    root: PathBuf,
}

impl FsRecordStore {
    /// Open a store at `root`, which must be an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::StoreNotFound { path: root });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document holding record `id`
    pub fn record_path(&self, id: u64) -> PathBuf {
        self.root.join(format!("{id}.{RECORD_EXTENSION}"))
    }

    /// Load a single record by id
    pub fn load(&self, id: u64) -> Result<Record> {
        read_record(&self.record_path(id))
    }
}

/// Parse a record document
pub fn read_record(path: &Path) -> Result<Record> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|source| Error::RecordParse {
        path: path.to_path_buf(),
        source,
    })
}

impl RecordStore for FsRecordStore {
    /// Unparseable documents are logged and left out rather than failing the
    /// whole listing.
    fn list(&self, categories: &[u32]) -> Result<Vec<Record>> {
        let entries = fs::read_dir(&self.root).map_err(|e| Error::io(&self.root, e))?;

        let mut records = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io(&self.root, e))?.path();
            let is_record = path.extension().is_some_and(|ext| ext == RECORD_EXTENSION)
                && !path
                    .file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with('.'));
            if !is_record {
                continue;
            }

            match read_record(&path) {
                Ok(record) if categories.contains(&record.category_id) => records.push(record),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable record");
                }
            }
        }

        records.sort_by_key(|record| record.id);
        tracing::debug!(count = records.len(), ?categories, "Listed records");
        Ok(records)
    }

    fn save(&self, record: &Record) -> Result<()> {
        let content = serde_json::to_string_pretty(record).map_err(|source| {
            Error::RecordSerialize {
                id: record.id,
                source,
            }
        })?;
        write_atomic(&self.record_path(record.id), content.as_bytes())?;
        tracing::debug!(record_id = record.id, "Saved record");
        Ok(())
    }
}
