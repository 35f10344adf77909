use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::error::OperationError;
use crate::traits::ChangelogStore;

/// Changelog storage backed by a single markdown file.
pub struct FileSystemChangelogStore {
    path: PathBuf,
}

impl FileSystemChangelogStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ChangelogStore for FileSystemChangelogStore {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(OperationError::ChangelogRead {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write(&self, content: &str) -> Result<()> {
        fs::write(&self.path, content).map_err(|source| OperationError::ChangelogWrite {
            path: self.path.clone(),
            source,
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
