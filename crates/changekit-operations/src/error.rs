use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Parse(#[from] changekit_parse::FormatError),

    #[error(transparent)]
    Version(#[from] changekit_version::VersionError),

    #[error(transparent)]
    Changelog(#[from] changekit_changelog::ChangelogError),

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error("failed to read changeset file '{path}'")]
    ChangesetFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse changeset file '{path}'")]
    ChangesetParse {
        path: PathBuf,
        #[source]
        source: changekit_parse::FormatError,
    },

    #[error("failed to write changeset file '{path}'")]
    ChangesetFileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list changeset files in '{path}'")]
    ChangesetList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete changeset file '{path}'")]
    ChangesetDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "release applied but {} consumed changeset(s) could not be deleted: {}",
        failed.len(),
        failed.join(", ")
    )]
    ChangesetCleanup { failed: Vec<String> },

    #[error("failed to read config file '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config")]
    ConfigSerialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write '{path}'")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read changelog at '{path}'")]
    ChangelogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write changelog at '{path}'")]
    ChangelogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "could not find a version heading in '{path}'; \
         expected a '## [x.y.z]' heading carrying the current version"
    )]
    CurrentVersionNotFound { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, OperationError>;
