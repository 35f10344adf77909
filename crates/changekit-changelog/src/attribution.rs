use indexmap::IndexMap;

use crate::error::ChangelogError;

/// Source-control metadata for the commit that introduced a changeset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    pub author: Option<String>,
    pub pr_number: Option<u64>,
    pub pr_url: Option<String>,
    pub commit_url: Option<String>,
}

/// Batched lookup of commit attribution data.
///
/// Implementations talk to a forge API; a single call resolves every requested
/// commit. Missing credentials or upstream failures must fail the whole batch
/// with an actionable error, never return silently empty results.
pub trait AttributionProvider {
    /// # Errors
    ///
    /// Returns [`ChangelogError::AttributionUnavailable`] when the batch
    /// cannot be resolved.
    fn lookup_many(
        &self,
        repo: &str,
        commits: &[&str],
    ) -> Result<IndexMap<String, Attribution>, ChangelogError>;
}

/// Per-run memo in front of an [`AttributionProvider`].
///
/// Created once per assembly run and passed explicitly to the section builder,
/// so the same commit is never requested twice no matter how many changesets
/// or packages reference it.
pub struct AttributionCache<'a> {
    provider: &'a dyn AttributionProvider,
    repo: String,
    cache: IndexMap<String, Attribution>,
}

impl<'a> AttributionCache<'a> {
    /// # Errors
    ///
    /// Returns [`ChangelogError::MissingRepoConfig`] when `repo` is empty or
    /// not of the form `owner/repo`.
    pub fn new(
        provider: &'a dyn AttributionProvider,
        repo: &str,
    ) -> Result<Self, ChangelogError> {
        let (owner, name) = repo.split_once('/').ok_or(ChangelogError::MissingRepoConfig)?;
        if owner.is_empty() || name.is_empty() {
            return Err(ChangelogError::MissingRepoConfig);
        }

        Ok(Self {
            provider,
            repo: repo.to_string(),
            cache: IndexMap::new(),
        })
    }

    /// Batch-fetches every commit not already cached.
    ///
    /// # Errors
    ///
    /// Propagates the provider's failure for the whole batch.
    pub fn prime(&mut self, commits: &[&str]) -> Result<(), ChangelogError> {
        let missing: Vec<&str> = commits
            .iter()
            .copied()
            .filter(|c| !self.cache.contains_key(*c))
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        let fetched = self.provider.lookup_many(&self.repo, &missing)?;
        // A commit the provider knows nothing about still gets a cache slot so
        // it is never requested again within this run.
        for commit in missing {
            let attribution = fetched.get(commit).cloned().unwrap_or_default();
            self.cache.insert(commit.to_string(), attribution);
        }

        Ok(())
    }

    /// # Errors
    ///
    /// Propagates the provider's failure when the commit is not cached yet.
    pub fn get(&mut self, commit: &str) -> Result<&Attribution, ChangelogError> {
        if !self.cache.contains_key(commit) {
            self.prime(&[commit])?;
        }
        Ok(&self.cache[commit])
    }
}
