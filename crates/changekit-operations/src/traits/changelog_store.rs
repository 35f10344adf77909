use std::path::Path;

use crate::Result;

/// Storage for the changelog document.
pub trait ChangelogStore: Send + Sync {
    /// Current document content; `None` when the document does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error for read faults other than absence.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the whole document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn write(&self, content: &str) -> Result<()>;

    /// Where the document lives, for reporting and staging.
    fn path(&self) -> &Path;
}
