mod init;
mod status;
mod version;

pub use init::{InitOperation, InitOutcome};
pub use status::{StatusOperation, StatusOutput};
pub use version::{AppliedRelease, VersionOperation, VersionOutcome};
