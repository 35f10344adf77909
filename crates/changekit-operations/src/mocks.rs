use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use changekit_changelog::{Attribution, AttributionProvider, ChangelogError};
use changekit_core::Changeset;
use changekit_parse::serialize_changeset;
use indexmap::IndexMap;

use crate::Result;
use crate::traits::{ChangelogStore, ChangesetStore, CommitResolver};

/// In-memory changeset store keyed by id.
pub struct MockChangesetStore {
    records: Mutex<IndexMap<String, String>>,
    next_id: Mutex<u32>,
}

impl MockChangesetStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Mutex::new(IndexMap::new()),
            next_id: Mutex::new(0),
        }
    }

    /// # Panics
    ///
    /// Panics if the changeset cannot be serialized.
    #[must_use]
    pub fn with_changeset(self, id: &str, changeset: &Changeset) -> Self {
        let raw = serialize_changeset(changeset).expect("serializable changeset");
        self.records
            .lock()
            .expect("lock poisoned")
            .insert(id.to_string(), raw);
        self
    }

    #[must_use]
    pub fn with_raw(self, id: &str, raw: &str) -> Self {
        self.records
            .lock()
            .expect("lock poisoned")
            .insert(id.to_string(), raw.to_string());
        self
    }

    #[must_use]
    pub fn remaining_ids(&self) -> Vec<String> {
        self.records
            .lock()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

impl Default for MockChangesetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangesetStore for MockChangesetStore {
    fn list(&self) -> Result<Vec<String>> {
        let mut ids = self.remaining_ids();
        ids.sort();
        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<String> {
        self.records
            .lock()
            .expect("lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| crate::error::OperationError::ChangesetFileRead {
                path: self.relative_path(id),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }

    fn create(&self, changeset: &Changeset) -> Result<String> {
        let mut next = self.next_id.lock().expect("lock poisoned");
        let id = format!("mock-{}", *next);
        *next += 1;

        let raw = serialize_changeset(changeset)?;
        self.records
            .lock()
            .expect("lock poisoned")
            .insert(id.clone(), raw);
        Ok(id)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.records.lock().expect("lock poisoned").shift_remove(id);
        Ok(())
    }

    fn relative_path(&self, id: &str) -> PathBuf {
        PathBuf::from(".changeset").join(format!("{id}.md"))
    }
}

/// In-memory changelog document.
pub struct MockChangelogStore {
    content: Mutex<Option<String>>,
    path: PathBuf,
}

impl MockChangelogStore {
    #[must_use]
    pub fn new(content: Option<&str>) -> Self {
        Self {
            content: Mutex::new(content.map(ToString::to_string)),
            path: PathBuf::from("CHANGELOG.md"),
        }
    }

    #[must_use]
    pub fn content(&self) -> Option<String> {
        self.content.lock().expect("lock poisoned").clone()
    }
}

impl ChangelogStore for MockChangelogStore {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.content())
    }

    fn write(&self, content: &str) -> Result<()> {
        *self.content.lock().expect("lock poisoned") = Some(content.to_string());
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Changelog store whose writes always fail.
pub struct BrokenChangelogStore {
    content: Option<String>,
    path: PathBuf,
}

impl BrokenChangelogStore {
    #[must_use]
    pub fn new(content: Option<&str>) -> Self {
        Self {
            content: content.map(ToString::to_string),
            path: PathBuf::from("CHANGELOG.md"),
        }
    }
}

impl ChangelogStore for BrokenChangelogStore {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.content.clone())
    }

    fn write(&self, _content: &str) -> Result<()> {
        Err(crate::error::OperationError::ChangelogWrite {
            path: self.path.clone(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Maps relative changeset paths to short commit hashes.
pub struct MockCommitResolver {
    commits: HashMap<PathBuf, String>,
}

impl MockCommitResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            commits: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_commit(mut self, path: &str, sha: &str) -> Self {
        self.commits.insert(PathBuf::from(path), sha.to_string());
        self
    }
}

impl Default for MockCommitResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitResolver for MockCommitResolver {
    fn commits_that_added(&self, paths: &[PathBuf]) -> Result<Vec<Option<String>>> {
        Ok(paths
            .iter()
            .map(|path| self.commits.get(path).cloned())
            .collect())
    }
}

/// Attributes every commit to the same author and pull request.
pub struct MockAttributionProvider {
    pub author: String,
    pub pr_number: u64,
}

impl AttributionProvider for MockAttributionProvider {
    fn lookup_many(
        &self,
        _repo: &str,
        commits: &[&str],
    ) -> std::result::Result<IndexMap<String, Attribution>, ChangelogError> {
        Ok(commits
            .iter()
            .map(|c| {
                (
                    (*c).to_string(),
                    Attribution {
                        author: Some(self.author.clone()),
                        pr_number: Some(self.pr_number),
                        ..Attribution::default()
                    },
                )
            })
            .collect())
    }
}
