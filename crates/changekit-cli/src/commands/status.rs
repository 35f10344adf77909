use std::path::Path;

use changekit_operations::operations::{StatusOperation, StatusOutput};
use changekit_operations::providers::FileSystemChangesetStore;

use crate::error::Result;

pub(crate) fn run(project_root: &Path) -> Result<()> {
    let store = FileSystemChangesetStore::new(project_root);

    let operation = StatusOperation::new(&store);
    let output = operation.execute()?;

    print_status(&output);

    Ok(())
}

fn print_status(output: &StatusOutput) {
    if output.changesets.is_empty() {
        println!("No pending changesets.");
        return;
    }

    println!("Pending changesets: {}", output.changesets.len());
    for changeset in &output.changesets {
        let summary = changeset.changeset.summary.text();
        let headline = summary.lines().next().unwrap_or_default();
        println!("  {}: {headline}", changeset.id);
    }
    println!();

    println!("Projected severities:");
    for (package, severity) in &output.projected {
        println!("  {package}: {severity}");
    }
}
