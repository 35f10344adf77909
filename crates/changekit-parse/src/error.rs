use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("missing opening delimiter '---'")]
    MissingOpeningDelimiter,

    #[error("missing closing delimiter '---'")]
    MissingClosingDelimiter,

    #[error("front matter is empty")]
    EmptyFrontMatter,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("changeset must contain at least one release")]
    NoReleases,

    #[error("input exceeds maximum size of {max_bytes} bytes")]
    InputTooLarge { max_bytes: usize },
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("categorized summary must be a single-key mapping: {0}")]
    NotAMapping(#[source] serde_yml::Error),

    #[error("categorized summary must contain exactly one category, found {found}")]
    ExpectedSingleCategory { found: usize },
}

/// Umbrella for anything that makes a changeset file unreadable.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Summary(#[from] SummaryError),
}
