//! Task configuration
//!
//! A run is configured by a TOML file:
//!
//! ```toml
//! [task]
//! base_url = "https://api.example.org/organisation/{{id}}"
//! profile = "organisation.json"
//! categories = [9]
//!
//! [paths]
//! profiles_dir = "profiles"
//! records_dir = "records"
//!
//! [fields]
//! id_field = "fetch-url-id"
//!
//! [tags]
//! changed = 2
//! unchanged = 4
//!
//! [http]
//! timeout_secs = 30
//! ```
//!
//! Only `[task]` is required. Relative paths are taken relative to the
//! configuration file's directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fetch::ID_PLACEHOLDER;

fn default_profiles_dir() -> PathBuf {
    PathBuf::from("profiles")
}

fn default_records_dir() -> PathBuf {
    PathBuf::from("records")
}

fn default_id_field() -> String {
    "fetch-url-id".to_string()
}

fn default_changed_tag() -> u32 {
    2
}

fn default_unchanged_tag() -> u32 {
    4
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("json2cf/", env!("CARGO_PKG_VERSION")).to_string()
}

/// What to synchronize
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskSection {
    /// Remote URL template; `{{id}}` is replaced with each record's remote id
    #[serde(default)]
    pub base_url: String,
    /// Profile file name, looked up in `paths.profiles_dir`
    #[serde(default)]
    pub profile: String,
    /// Category ids whose records are synchronized
    #[serde(default)]
    pub categories: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsSection {
    #[serde(default = "default_profiles_dir")]
    pub profiles_dir: PathBuf,
    #[serde(default = "default_records_dir")]
    pub records_dir: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            profiles_dir: default_profiles_dir(),
            records_dir: default_records_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldsSection {
    /// Field holding the record's id at the remote API
    #[serde(default = "default_id_field")]
    pub id_field: String,
}

impl Default for FieldsSection {
    fn default() -> Self {
        Self {
            id_field: default_id_field(),
        }
    }
}

/// Status tags assigned after each record is processed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsSection {
    #[serde(default = "default_changed_tag")]
    pub changed: u32,
    #[serde(default = "default_unchanged_tag")]
    pub unchanged: u32,
}

impl Default for TagsSection {
    fn default() -> Self {
        Self {
            changed: default_changed_tag(),
            unchanged: default_unchanged_tag(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSection {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Parsed task configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub task: TaskSection,
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub fields: FieldsSection,
    #[serde(default)]
    pub tags: TagsSection,
    #[serde(default)]
    pub http: HttpSection,
}

impl SyncConfig {
    /// Parse configuration from TOML content
    ///
    /// ```
    /// use json2cf_sync::SyncConfig;
    ///
    /// let config = SyncConfig::parse(r#"
    /// [task]
    /// base_url = "https://api.example.org/org/{{id}}"
    /// profile = "org.json"
    /// categories = [9]
    /// "#).unwrap();
    ///
    /// assert_eq!(config.fields.id_field, "fetch-url-id");
    /// assert_eq!(config.tags.changed, 2);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let config: SyncConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from a file, anchoring relative paths at its directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;

        if let Some(base) = path.parent() {
            config.paths.profiles_dir = anchor(base, &config.paths.profiles_dir);
            config.paths.records_dir = anchor(base, &config.paths.records_dir);
        }

        Ok(config)
    }

    /// Check the task settings a run cannot proceed without
    pub fn validate(&self) -> Result<()> {
        if self.task.base_url.trim().is_empty() {
            return Err(Error::invalid_config("task.base_url is empty"));
        }
        if !self.task.base_url.contains(ID_PLACEHOLDER) {
            tracing::warn!(
                base_url = %self.task.base_url,
                "task.base_url has no {} placeholder; every record fetches the same URL",
                ID_PLACEHOLDER
            );
        }
        if self.task.profile.trim().is_empty() {
            return Err(Error::invalid_config("task.profile is empty"));
        }
        if self.task.categories.is_empty() {
            return Err(Error::invalid_config("task.categories lists no category"));
        }
        if self.task.categories.contains(&0) {
            return Err(Error::invalid_config("task.categories ids must be 1 or greater"));
        }
        if self.fields.id_field.is_empty() {
            return Err(Error::invalid_config("fields.id_field is empty"));
        }
        Ok(())
    }

    /// Location of the configured profile document
    pub fn profile_path(&self) -> PathBuf {
        self.paths.profiles_dir.join(&self.task.profile)
    }
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
