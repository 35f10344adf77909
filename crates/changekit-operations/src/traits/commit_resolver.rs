use std::path::PathBuf;

use crate::Result;

/// Looks up which commit introduced each of a set of files.
pub trait CommitResolver: Send + Sync {
    /// Short commit hashes in input order; `None` where a path was never
    /// added in history.
    ///
    /// # Errors
    ///
    /// Returns an error if history cannot be walked.
    fn commits_that_added(&self, paths: &[PathBuf]) -> Result<Vec<Option<String>>>;
}
