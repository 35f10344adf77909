use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangelogError {
    #[error(
        "attribution requires a repository identifier in the form 'owner/repo'; \
         set \"repo\" in .changeset/config.json"
    )]
    MissingRepoConfig,

    #[error("attribution lookup failed: {reason}")]
    AttributionUnavailable { reason: String },
}
