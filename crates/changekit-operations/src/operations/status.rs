use changekit_core::{PendingChangeset, Severity};
use changekit_parse::parse_changeset;
use indexmap::IndexMap;

use crate::Result;
use crate::error::OperationError;
use crate::planner::merge_severity;
use crate::traits::ChangesetStore;

/// A read-only projection of the pending release.
#[derive(Debug)]
pub struct StatusOutput {
    pub changesets: Vec<PendingChangeset>,
    /// Folded severity per package, in first-seen order.
    pub projected: IndexMap<String, Severity>,
}

/// Reports what a release would do without touching anything.
pub struct StatusOperation<'a> {
    changesets: &'a dyn ChangesetStore,
}

impl<'a> StatusOperation<'a> {
    #[must_use]
    pub fn new(changesets: &'a dyn ChangesetStore) -> Self {
        Self { changesets }
    }

    /// # Errors
    ///
    /// Returns an error if changesets cannot be listed, read, or parsed.
    pub fn execute(&self) -> Result<StatusOutput> {
        let ids = self.changesets.list()?;

        let mut changesets = Vec::new();
        let mut projected: IndexMap<String, Severity> = IndexMap::new();

        for id in &ids {
            let raw = self.changesets.read(id)?;
            let changeset =
                parse_changeset(&raw).map_err(|source| OperationError::ChangesetParse {
                    path: self.changesets.relative_path(id),
                    source,
                })?;

            for release in &changeset.releases {
                let folded = merge_severity(
                    projected.get(&release.name).copied(),
                    release.severity,
                );
                projected.insert(release.name.clone(), folded);
            }

            changesets.push(PendingChangeset::new(id, changeset));
        }

        Ok(StatusOutput {
            changesets,
            projected,
        })
    }
}
