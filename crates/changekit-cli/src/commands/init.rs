use std::path::Path;

use changekit_operations::operations::{InitOperation, InitOutcome};

use crate::error::Result;

pub(crate) fn run(project_root: &Path) -> Result<()> {
    let operation = InitOperation::new(project_root);

    match operation.execute()? {
        InitOutcome::Initialized => {
            println!("Initialized .changeset/ with a default config.json.");
            println!("Add changeset files there and run `changekit version` to release.");
        }
        InitOutcome::AlreadyInitialized => {
            println!("Changesets already initialized; kept the existing config.json.");
        }
    }

    Ok(())
}
