use std::path::Path;

use changekit_core::Severity;
use changekit_operations::operations::{VersionOperation, VersionOutcome};
use changekit_operations::providers::{
    FileSystemChangelogStore, FileSystemChangesetStore, Git2CommitResolver,
};
use changekit_operations::Config;

use crate::error::Result;

pub(crate) fn run(project_root: &Path) -> Result<()> {
    let config = Config::load(project_root)?;

    let changesets = FileSystemChangesetStore::new(project_root);
    let changelog = FileSystemChangelogStore::new(project_root.join(&config.changelog_path));
    let resolver = Git2CommitResolver::new(project_root);

    let operation = VersionOperation::new(&changesets, &changelog, &resolver, None, &config);

    match operation.execute()? {
        VersionOutcome::NothingToRelease => {
            println!("No pending changesets; nothing to release.");
        }
        VersionOutcome::Released(release) => {
            println!("Released version {}", release.plan.new_version);
            for package in &release.plan.releases {
                let marker = if package.severity == Severity::None {
                    " (unchanged)"
                } else {
                    ""
                };
                println!(
                    "  {}: {} -> {}{marker}",
                    package.name, package.old_version, package.new_version
                );
            }

            if !release.touched_files.is_empty() {
                println!();
                println!("Modified files:");
                for file in &release.touched_files {
                    println!("  {}", file.display());
                }
            }

            println!();
            println!("Suggested commit message:");
            println!("{}", release.commit_message);
        }
    }

    Ok(())
}
