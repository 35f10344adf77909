use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::OperationError;
use crate::Result;

pub const CHANGESET_DIR: &str = ".changeset";
pub(crate) const CONFIG_FILE: &str = "config.json";

/// Release configuration, read from `.changeset/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Changelog location relative to the project root.
    pub changelog_path: PathBuf,
    /// `owner/repo` identifier used for attribution lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Branch releases are cut from.
    pub base_branch: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            changelog_path: PathBuf::from("CHANGELOG.md"),
            repo: None,
            base_branch: "main".to_string(),
        }
    }
}

impl Config {
    /// Loads the config from `<project_root>/.changeset/config.json`.
    ///
    /// A missing file yields the defaults; a present but malformed file is an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::ConfigRead`] or [`OperationError::ConfigParse`].
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CHANGESET_DIR).join(CONFIG_FILE);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(OperationError::ConfigRead { path, source }),
        };

        serde_json::from_str(&content)
            .map_err(|source| OperationError::ConfigParse { path, source })
    }
}
