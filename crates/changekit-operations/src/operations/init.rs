use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::Result;
use crate::config::{CHANGESET_DIR, CONFIG_FILE, Config};
use crate::error::OperationError;

const README_FILE: &str = "README.md";

const README_CONTENT: &str = "\
# Changesets

This folder holds pending changeset files, one markdown file per change.

Run `changekit status` to see the pending changesets and the release they
project, and `changekit version` to fold them into the changelog.
";

/// What [`InitOperation::execute`] found on disk.
#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    /// `.changeset/` was set up with the default config.
    Initialized,
    /// A config already existed and was left untouched.
    AlreadyInitialized,
}

/// Sets up the `.changeset/` directory with a default config and README.
///
/// Re-running never overwrites an existing `config.json`; the README is
/// refreshed on every run.
pub struct InitOperation<'a> {
    project_root: &'a Path,
}

impl<'a> InitOperation<'a> {
    #[must_use]
    pub fn new(project_root: &'a Path) -> Self {
        Self { project_root }
    }

    /// # Errors
    ///
    /// Returns an error if the directory or its files cannot be written.
    pub fn execute(&self) -> Result<InitOutcome> {
        let changeset_dir = self.project_root.join(CHANGESET_DIR);
        fs::create_dir_all(&changeset_dir).map_err(|source| OperationError::ConfigWrite {
            path: changeset_dir.clone(),
            source,
        })?;

        let config_path = changeset_dir.join(CONFIG_FILE);
        let outcome = if config_path.exists() {
            warn!("changesets already initialized; keeping the existing config");
            InitOutcome::AlreadyInitialized
        } else {
            write_file(&config_path, &default_config_json()?)?;
            InitOutcome::Initialized
        };

        write_file(&changeset_dir.join(README_FILE), README_CONTENT)?;

        Ok(outcome)
    }
}

fn default_config_json() -> Result<String> {
    let mut json = serde_json::to_string_pretty(&Config::default())
        .map_err(|source| OperationError::ConfigSerialize { source })?;
    json.push('\n');
    Ok(json)
}

fn write_file(path: &PathBuf, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| OperationError::ConfigWrite {
        path: path.clone(),
        source,
    })
}
