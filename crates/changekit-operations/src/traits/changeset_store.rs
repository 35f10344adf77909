use std::path::PathBuf;

use changekit_core::Changeset;

use crate::Result;

/// Storage for pending changeset records, keyed by id.
///
/// Ids are assigned at creation, unique within the pending set, and never
/// reused. Records are immutable between creation and consumption.
pub trait ChangesetStore: Send + Sync {
    /// Ids of all pending changesets, sorted for deterministic processing.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be listed.
    fn list(&self) -> Result<Vec<String>>;

    /// Raw text of one changeset.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read.
    fn read(&self, id: &str) -> Result<String>;

    /// Persists a new changeset and returns its freshly assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    fn create(&self, changeset: &Changeset) -> Result<String>;

    /// Removes a consumed changeset. Deleting a missing id is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only for real storage faults.
    fn delete(&self, id: &str) -> Result<()>;

    /// Path of the record relative to the project root, for commit resolution.
    fn relative_path(&self, id: &str) -> PathBuf;
}
