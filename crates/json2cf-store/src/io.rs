//! Record document I/O
//!
//! Saves go through a sibling temp file that is renamed over the target, so a
//! reader listing the store sees either the old document or the new one.

use std::fs;
use std::io::Write;
use std::path::Path;

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Prefix of in-flight temp files; the store skips dotfiles when listing
const TEMP_PREFIX: &str = ".json2cf-";

/// Replace the file at `path` with `content`.
///
/// The temp file is created in the target's directory and held under an
/// exclusive lock until it is synced. It is removed on every failure path,
/// including a failed final rename.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let mut staged = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::io(dir, e))?;

    write_locked(&mut staged, content)?;

    // a failed persist hands the temp file back; dropping it deletes it
    staged
        .persist(path)
        .map_err(|e| Error::io(path, e.error))?;

    Ok(())
}

fn write_locked(staged: &mut NamedTempFile, content: &[u8]) -> Result<()> {
    let staged_path = staged.path().to_path_buf();
    let file = staged.as_file_mut();

    FileExt::lock_exclusive(&*file).map_err(|_| Error::LockFailed {
        path: staged_path.clone(),
    })?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::io(&staged_path, e))?;
    FileExt::unlock(&*file).map_err(|_| Error::LockFailed { path: staged_path })
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
