use indexmap::IndexMap;

use changekit_core::{ChangeCategory, Changeset, Severity, Summary};

use crate::error::{FormatError, ValidationError};
use crate::parse::FRONT_MATTER_DELIMITER;

/// Renders a changeset back into its on-disk form.
///
/// # Errors
///
/// Returns [`ValidationError::NoReleases`] for a changeset with an empty
/// releases list, or a YAML error if serialization fails.
pub fn serialize_changeset(changeset: &Changeset) -> Result<String, FormatError> {
    if changeset.releases.is_empty() {
        return Err(ValidationError::NoReleases.into());
    }

    let releases_map: IndexMap<&str, Severity> = changeset
        .releases
        .iter()
        .map(|r| (r.name.as_str(), r.severity))
        .collect();

    let yaml = serde_yml::to_string(&releases_map)?;

    let mut output = String::new();
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');
    output.push_str(&yaml);
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');

    match &changeset.summary {
        Summary::Plain(text) => {
            if !text.is_empty() {
                output.push_str(text);
                output.push('\n');
            }
        }
        Summary::Categorized { category, detail } => {
            let body: IndexMap<ChangeCategory, &str> =
                IndexMap::from_iter([(*category, detail.as_str())]);
            output.push_str(&serde_yml::to_string(&body)?);
        }
    }

    Ok(output)
}
