use std::fs;
use std::path::{Path, PathBuf};

use changekit_core::Changeset;
use changekit_parse::serialize_changeset;

use crate::Result;
use crate::config::CHANGESET_DIR;
use crate::error::OperationError;
use crate::traits::ChangesetStore;

const MAX_FILENAME_ATTEMPTS: usize = 100;

/// Changeset storage over `<project_root>/.changeset/*.md`.
///
/// The file stem is the changeset id.
pub struct FileSystemChangesetStore {
    project_root: PathBuf,
}

impl FileSystemChangesetStore {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }

    fn changeset_dir(&self) -> PathBuf {
        self.project_root.join(CHANGESET_DIR)
    }

    fn file_path(&self, id: &str) -> PathBuf {
        self.changeset_dir().join(format!("{id}.md"))
    }
}

impl ChangesetStore for FileSystemChangesetStore {
    fn list(&self) -> Result<Vec<String>> {
        let dir = self.changeset_dir();

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(OperationError::ChangesetList { path: dir, source }),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| OperationError::ChangesetList {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();

            if path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }

        ids.sort();
        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<String> {
        let path = self.file_path(id);
        fs::read_to_string(&path)
            .map_err(|source| OperationError::ChangesetFileRead { path, source })
    }

    fn create(&self, changeset: &Changeset) -> Result<String> {
        let dir = self.changeset_dir();
        fs::create_dir_all(&dir).map_err(|source| OperationError::ChangesetFileWrite {
            path: dir.clone(),
            source,
        })?;

        let id = generate_unique_id(&dir);
        let path = self.file_path(&id);

        let content = serialize_changeset(changeset)?;
        fs::write(&path, content)
            .map_err(|source| OperationError::ChangesetFileWrite { path, source })?;

        Ok(id)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = self.file_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            // Deleting a missing record is fine: deletion is idempotent.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(OperationError::ChangesetDelete { path, source }),
        }
    }

    fn relative_path(&self, id: &str) -> PathBuf {
        PathBuf::from(CHANGESET_DIR).join(format!("{id}.md"))
    }
}

fn generate_unique_id(changeset_dir: &Path) -> String {
    for _ in 0..MAX_FILENAME_ATTEMPTS {
        if let Some(name) = petname::petname(3, "-") {
            if !changeset_dir.join(format!("{name}.md")).exists() {
                return name;
            }
        }
    }

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("changeset-{timestamp}")
}
