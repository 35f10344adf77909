use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Semantic-version impact of a change.
///
/// The variant order defines the total order used when combining severities:
/// `None < Patch < Minor < Major`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        write!(f, "{s}")
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    Added,
    #[default]
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Security,
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Added => "added",
            Self::Changed => "changed",
            Self::Deprecated => "deprecated",
            Self::Removed => "removed",
            Self::Fixed => "fixed",
            Self::Security => "security",
        };
        write!(f, "{s}")
    }
}

/// Human-readable description of a change, resolved once at parse time.
///
/// The plain shape carries the summary body verbatim; the categorized shape
/// additionally tags it with a [`ChangeCategory`]. Both flow through the rest
/// of the pipeline uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Summary {
    Plain(String),
    Categorized {
        category: ChangeCategory,
        detail: String,
    },
}

impl Summary {
    /// The rendered body of the summary.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Categorized { detail, .. } => detail,
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<ChangeCategory> {
        match self {
            Self::Plain(_) => None,
            Self::Categorized { category, .. } => Some(*category),
        }
    }
}

/// One intended version bump declared by a changeset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRelease {
    pub name: String,
    pub severity: Severity,
}

/// One contributor-authored record: intended bumps plus a description.
///
/// Release order matches the order packages were declared in the source file.
/// A package name never appears twice within one changeset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    pub releases: Vec<PackageRelease>,
    pub summary: Summary,
}

/// A changeset that exists on disk, awaiting consumption by a release.
///
/// The id is the file stem, assigned at creation and never reused. The commit
/// hash is filled in by the commit resolver when the file is found in history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChangeset {
    pub id: String,
    pub changeset: Changeset,
    pub commit: Option<String>,
}

impl PendingChangeset {
    #[must_use]
    pub fn new(id: impl Into<String>, changeset: Changeset) -> Self {
        Self {
            id: id.into(),
            changeset,
            commit: None,
        }
    }

    #[must_use]
    pub fn with_commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }
}
