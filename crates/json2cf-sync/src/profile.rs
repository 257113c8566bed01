//! Loading the mapping profile for a run

use std::fs;
use std::path::Path;

use json2cf_map::Profile;

use crate::error::{Error, Result};

/// Read and parse the profile document at `path`.
///
/// Malformed entries are dropped with a warning; a profile left with no rules
/// is an error since the run could not change anything.
pub fn load_profile(path: &Path) -> Result<Profile> {
    let content = fs::read_to_string(path).map_err(|source| Error::ProfileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let profile = Profile::parse(&content).map_err(|source| Error::Profile {
        path: path.to_path_buf(),
        source,
    })?;

    if profile.skipped() > 0 {
        tracing::warn!(
            path = %path.display(),
            skipped = profile.skipped(),
            "Ignoring malformed profile entries"
        );
    }

    if profile.is_empty() {
        return Err(Error::EmptyProfile {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(path = %path.display(), rules = profile.len(), "Loaded profile");
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_profile() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("org.json");
        fs::write(
            &path,
            r#"[{"fieldName": "zip", "external": "address.zip"}, {"bogus": true}]"#,
        )
        .unwrap();

        let profile = load_profile(&path).unwrap();

        assert_eq!(profile.len(), 1);
        assert_eq!(profile.skipped(), 1);
    }

    #[test]
    fn test_missing_profile() {
        let temp = TempDir::new().unwrap();
        let err = load_profile(&temp.path().join("none.json")).unwrap_err();
        assert!(matches!(err, Error::ProfileRead { .. }));
    }

    #[test]
    fn test_profile_that_is_not_a_list() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("org.json");
        fs::write(&path, "{}").unwrap();

        let err = load_profile(&path).unwrap_err();
        assert!(matches!(err, Error::Profile { .. }));
    }

    #[test]
    fn test_empty_profile() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("org.json");
        fs::write(&path, "[]").unwrap();

        let err = load_profile(&path).unwrap_err();
        assert!(matches!(err, Error::EmptyProfile { .. }));
    }
}
