mod init;
mod status;
mod version;

use std::path::Path;

use clap::Subcommand;

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Set up the .changeset directory with a default config
    Init,
    /// Show pending changesets and the projected release
    Status,
    /// Consume pending changesets into a changelog release
    Version,
}

impl Commands {
    pub(crate) fn execute(self, project_root: &Path) -> Result<()> {
        match self {
            Self::Init => init::run(project_root),
            Self::Status => status::run(project_root),
            Self::Version => version::run(project_root),
        }
    }
}
