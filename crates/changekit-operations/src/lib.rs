mod commit;
mod config;
mod error;
pub mod operations;
mod planner;
pub mod providers;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use commit::{add_commit_message, release_commit_message};
pub use config::{CHANGESET_DIR, Config};
pub use error::{OperationError, Result};
pub use planner::{ComprehensiveRelease, ReleasePlan, assemble_release_plan, merge_severity};
