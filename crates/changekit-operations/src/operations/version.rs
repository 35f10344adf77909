use std::path::PathBuf;

use changekit_changelog::{
    AttributionCache, AttributionProvider, ChangelogDocument, ChangelogError, build_sections,
    render_sections, splice,
};
use changekit_core::PendingChangeset;
use changekit_parse::parse_changeset;
use tracing::{debug, warn};

use crate::Result;
use crate::commit::release_commit_message;
use crate::config::Config;
use crate::error::OperationError;
use crate::planner::{ReleasePlan, assemble_release_plan};
use crate::traits::{ChangelogStore, ChangesetStore, CommitResolver};

/// What [`VersionOperation::execute`] produced.
#[derive(Debug)]
pub enum VersionOutcome {
    /// No pending changesets; nothing was touched.
    NothingToRelease,
    Released(AppliedRelease),
}

/// A release that has been applied to the changelog.
#[derive(Debug)]
pub struct AppliedRelease {
    pub plan: ReleasePlan,
    /// Files modified by the run, relative to the project root. Empty when the
    /// changelog write failed and was skipped.
    pub touched_files: Vec<PathBuf>,
    pub commit_message: String,
}

/// Consumes all pending changesets into one changelog release.
///
/// Reads and parses every pending changeset, assembles the release plan,
/// splices the rendered release into the changelog, and deletes the consumed
/// changesets. A changelog write fault is logged and skipped so the consumed
/// changesets are still cleaned up; a cleanup fault is reported after the
/// release has been applied.
pub struct VersionOperation<'a> {
    changesets: &'a dyn ChangesetStore,
    changelog: &'a dyn ChangelogStore,
    commits: &'a dyn CommitResolver,
    attribution: Option<&'a dyn AttributionProvider>,
    config: &'a Config,
}

impl<'a> VersionOperation<'a> {
    #[must_use]
    pub fn new(
        changesets: &'a dyn ChangesetStore,
        changelog: &'a dyn ChangelogStore,
        commits: &'a dyn CommitResolver,
        attribution: Option<&'a dyn AttributionProvider>,
        config: &'a Config,
    ) -> Self {
        Self {
            changesets,
            changelog,
            commits,
            attribution,
            config,
        }
    }

    /// # Errors
    ///
    /// Returns an error if changesets cannot be read or parsed, the changelog
    /// carries no current version, attribution fails, or consumed changesets
    /// cannot be deleted.
    pub fn execute(&self) -> Result<VersionOutcome> {
        let ids = self.changesets.list()?;
        if ids.is_empty() {
            return Ok(VersionOutcome::NothingToRelease);
        }
        debug!(count = ids.len(), "assembling release plan");

        let mut pending = self.load_pending(&ids)?;

        let document = ChangelogDocument::new(self.changelog.read()?.unwrap_or_default());
        let old_version =
            document
                .current_version()
                .ok_or_else(|| OperationError::CurrentVersionNotFound {
                    path: self.changelog.path().to_path_buf(),
                })?;

        let paths: Vec<PathBuf> = ids
            .iter()
            .map(|id| self.changesets.relative_path(id))
            .collect();
        let resolved = self.commits.commits_that_added(&paths)?;
        for (changeset, commit) in pending.iter_mut().zip(resolved) {
            changeset.commit = commit;
        }

        let plan = assemble_release_plan(&pending, &old_version);
        debug!(
            new_version = %plan.new_version,
            packages = plan.releases.len(),
            "release plan assembled"
        );

        let mut cache = match self.attribution {
            Some(provider) => {
                let repo = self
                    .config
                    .repo
                    .as_deref()
                    .ok_or(ChangelogError::MissingRepoConfig)?;
                let cache = AttributionCache::new(provider, repo)?;
                // Lookups happen only when every changeset was found in
                // history; a partial set would attribute some entries and not
                // others within the same release.
                plan.changesets
                    .iter()
                    .all(|cs| cs.commit.is_some())
                    .then_some(cache)
            }
            None => None,
        };

        let sections = build_sections(&plan.changesets, cache.as_mut())?;
        let body = render_sections(&sections);
        let updated = splice(
            document.content(),
            &plan.new_version,
            chrono::Local::now().date_naive(),
            &body,
        );

        let mut touched_files = Vec::new();
        match self.changelog.write(&updated) {
            Ok(()) => touched_files.push(self.changelog.path().to_path_buf()),
            // The plan is still applied; only the document update is lost.
            Err(e) => warn!(error = %e, "skipping changelog update"),
        }

        let mut failed = Vec::new();
        for id in &ids {
            if let Err(e) = self.changesets.delete(id) {
                warn!(id, error = %e, "failed to delete consumed changeset");
                failed.push(id.clone());
            } else {
                touched_files.push(self.changesets.relative_path(id));
            }
        }
        if !failed.is_empty() {
            return Err(OperationError::ChangesetCleanup { failed });
        }

        let commit_message = release_commit_message(&plan);

        Ok(VersionOutcome::Released(AppliedRelease {
            plan,
            touched_files,
            commit_message,
        }))
    }

    fn load_pending(&self, ids: &[String]) -> Result<Vec<PendingChangeset>> {
        ids.iter()
            .map(|id| {
                let raw = self.changesets.read(id)?;
                let changeset =
                    parse_changeset(&raw).map_err(|source| OperationError::ChangesetParse {
                        path: self.changesets.relative_path(id),
                        source,
                    })?;
                Ok(PendingChangeset::new(id, changeset))
            })
            .collect()
    }
}
