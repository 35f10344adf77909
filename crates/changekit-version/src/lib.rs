use semver::{BuildMetadata, Prerelease, Version};
use thiserror::Error;

use changekit_core::Severity;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("'{version}' is not a valid semantic version")]
    InvalidVersion {
        version: String,
        #[source]
        source: semver::Error,
    },
}

/// Parses a version string, mapping failures to [`VersionError::InvalidVersion`].
///
/// # Errors
///
/// Returns [`VersionError::InvalidVersion`] when the string is not parseable
/// semver.
pub fn parse_version(version: &str) -> Result<Version, VersionError> {
    Version::parse(version).map_err(|source| VersionError::InvalidVersion {
        version: version.to_string(),
        source,
    })
}

/// Computes the semantic-version successor at the given severity.
///
/// A severity of [`Severity::None`] returns the version unchanged. Any real
/// bump resets the lower components and strips pre-release and build metadata,
/// matching standard semver increment semantics.
#[must_use]
pub fn increment(version: &Version, severity: Severity) -> Version {
    if severity == Severity::None {
        return version.clone();
    }

    let mut next = version.clone();
    next.pre = Prerelease::EMPTY;
    next.build = BuildMetadata::EMPTY;

    match severity {
        Severity::Major => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
        }
        Severity::Minor => {
            next.minor += 1;
            next.patch = 0;
        }
        Severity::Patch => {
            next.patch += 1;
        }
        Severity::None => unreachable!("handled above"),
    }

    next
}

/// The largest severity in the iterator, or [`Severity::None`] when empty.
#[must_use]
pub fn max_severity<I>(severities: I) -> Severity
where
    I: IntoIterator<Item = Severity>,
{
    severities.into_iter().max().unwrap_or(Severity::None)
}
