use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::traits::CommitResolver;

const SHORT_HASH_LEN: usize = 7;

/// Resolves introducing commits by walking repository history with git2.
pub struct Git2CommitResolver {
    project_root: PathBuf,
}

impl Git2CommitResolver {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }
}

impl CommitResolver for Git2CommitResolver {
    fn commits_that_added(&self, paths: &[PathBuf]) -> Result<Vec<Option<String>>> {
        // Commit lookup is best-effort: outside a repository, or on an unborn
        // HEAD, nothing was ever added.
        let Ok(repo) = git2::Repository::discover(&self.project_root) else {
            return Ok(vec![None; paths.len()]);
        };

        let mut revwalk = repo.revwalk()?;
        if revwalk.push_head().is_err() {
            return Ok(vec![None; paths.len()]);
        }
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;

        let mut found: HashMap<&Path, String> = HashMap::new();

        for oid in revwalk {
            let oid = oid?;
            let commit = repo.find_commit(oid)?;
            let tree = commit.tree()?;

            let parent_tree = match commit.parent(0) {
                Ok(parent) => Some(parent.tree()?),
                Err(_) => None,
            };

            let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

            for delta in diff.deltas() {
                if delta.status() != git2::Delta::Added {
                    continue;
                }
                let Some(added) = delta.new_file().path() else {
                    continue;
                };
                for target in paths {
                    if target.as_path() == added {
                        let mut sha = oid.to_string();
                        sha.truncate(SHORT_HASH_LEN);
                        // Walking newest to oldest; later matches are earlier
                        // in history, so the last write wins.
                        found.insert(target.as_path(), sha);
                    }
                }
            }
        }

        Ok(paths
            .iter()
            .map(|path| found.get(path.as_path()).cloned())
            .collect())
    }
}
