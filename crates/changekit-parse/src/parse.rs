use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::{MapPreventDuplicates, serde_as};

use changekit_core::{ChangeCategory, Changeset, PackageRelease, Severity, Summary};

use crate::error::{FormatError, FrontMatterError, SummaryError, ValidationError};

pub(crate) const FRONT_MATTER_DELIMITER: &str = "---";

const MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

#[serde_as]
#[derive(Deserialize)]
struct ReleasesMap {
    #[serde(flatten)]
    #[serde_as(as = "MapPreventDuplicates<_, _>")]
    releases: IndexMap<String, Severity>,
}

fn strip_line_ending(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

// The closing delimiter is a line consisting solely of `---`; lines that
// merely start with it (`----`, `--- foo`) do not count.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let stripped = line.strip_suffix('\n').unwrap_or(line);
        let stripped = stripped.strip_suffix('\r').unwrap_or(stripped);
        if stripped == FRONT_MATTER_DELIMITER {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

fn extract_front_matter(content: &str) -> Result<(&str, &str), FormatError> {
    let trimmed = content.trim_start();

    if !trimmed.starts_with(FRONT_MATTER_DELIMITER) {
        return Err(FrontMatterError::MissingOpeningDelimiter.into());
    }

    let after_opening = &trimmed[FRONT_MATTER_DELIMITER.len()..];
    let after_opening = strip_line_ending(after_opening);

    let Some(closing_pos) = find_closing_delimiter(after_opening) else {
        return Err(FrontMatterError::MissingClosingDelimiter.into());
    };

    let yaml_content = &after_opening[..closing_pos];
    let yaml_content = yaml_content.trim_end_matches('\r');
    if yaml_content.trim().is_empty() {
        return Err(FrontMatterError::EmptyFrontMatter.into());
    }

    let after_closing = &after_opening[closing_pos + FRONT_MATTER_DELIMITER.len()..];
    let body = strip_line_ending(after_closing);

    Ok((yaml_content, body))
}

fn parse_releases(yaml_content: &str) -> Result<Vec<PackageRelease>, FormatError> {
    let parsed: ReleasesMap = serde_yml::from_str(yaml_content)?;
    let releases_map = parsed.releases;

    if releases_map.is_empty() {
        return Err(ValidationError::NoReleases.into());
    }

    Ok(releases_map
        .into_iter()
        .map(|(name, severity)| PackageRelease { name, severity })
        .collect())
}

/// Parses a changeset file with a free-form summary body.
///
/// # Errors
///
/// Returns [`FormatError`] when the delimiters are missing, the releases
/// mapping is malformed or empty, or the input exceeds the size limit.
pub fn parse_changeset(content: &str) -> Result<Changeset, FormatError> {
    if content.len() > MAX_INPUT_SIZE {
        return Err(ValidationError::InputTooLarge {
            max_bytes: MAX_INPUT_SIZE,
        }
        .into());
    }

    let (yaml_content, body) = extract_front_matter(content)?;
    let releases = parse_releases(yaml_content)?;

    Ok(Changeset {
        releases,
        summary: Summary::Plain(body.trim().to_string()),
    })
}

/// Parses a changeset file whose summary is itself a one-key mapping from a
/// change category (`added`, `fixed`, ...) to the detail text.
///
/// # Errors
///
/// Fails like [`parse_changeset`], and additionally with
/// [`SummaryError`](crate::error::SummaryError) when the summary region is not
/// a single-category mapping.
pub fn parse_categorized_changeset(content: &str) -> Result<Changeset, FormatError> {
    if content.len() > MAX_INPUT_SIZE {
        return Err(ValidationError::InputTooLarge {
            max_bytes: MAX_INPUT_SIZE,
        }
        .into());
    }

    let (yaml_content, body) = extract_front_matter(content)?;
    let releases = parse_releases(yaml_content)?;
    let summary = parse_categorized_summary(body)?;

    Ok(Changeset { releases, summary })
}

fn parse_categorized_summary(body: &str) -> Result<Summary, FormatError> {
    let parsed: IndexMap<ChangeCategory, String> =
        serde_yml::from_str(body.trim()).map_err(SummaryError::NotAMapping)?;

    if parsed.len() != 1 {
        return Err(SummaryError::ExpectedSingleCategory {
            found: parsed.len(),
        }
        .into());
    }

    let (category, detail) = parsed
        .into_iter()
        .next()
        .ok_or(SummaryError::ExpectedSingleCategory { found: 0 })?;

    Ok(Summary::Categorized {
        category,
        detail: detail.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_package_with_summary() {
        let content = r#"---
"my-package": patch
---
Fix critical bug in authentication flow.
"#;

        let changeset = parse_changeset(content).expect("should parse");
        assert_eq!(changeset.releases.len(), 1);
        assert_eq!(changeset.releases[0].name, "my-package");
        assert_eq!(changeset.releases[0].severity, Severity::Patch);
        assert_eq!(
            changeset.summary,
            Summary::Plain("Fix critical bug in authentication flow.".to_string())
        );
    }

    #[test]
    fn multiple_packages_preserves_order() {
        let content = r#"---
"pkg-one": major
"pkg-two": minor
"pkg-three": none
---
Breaking change to API.
"#;

        let changeset = parse_changeset(content).expect("should parse");
        assert_eq!(changeset.releases.len(), 3);

        assert_eq!(changeset.releases[0].name, "pkg-one");
        assert_eq!(changeset.releases[0].severity, Severity::Major);
        assert_eq!(changeset.releases[1].name, "pkg-two");
        assert_eq!(changeset.releases[1].severity, Severity::Minor);
        assert_eq!(changeset.releases[2].name, "pkg-three");
        assert_eq!(changeset.releases[2].severity, Severity::None);
    }

    #[test]
    fn multiline_summary_taken_verbatim() {
        let content = r#"---
"my-package": minor
---
This is a multiline summary.

It contains multiple paragraphs and describes the change in detail.
"#;

        let changeset = parse_changeset(content).expect("should parse");
        let text = changeset.summary.text();
        assert!(text.starts_with("This is a multiline summary."));
        assert!(text.contains("multiple paragraphs"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn empty_body_yields_empty_summary() {
        let content = r#"---
"my-package": patch
---
"#;

        let changeset = parse_changeset(content).expect("should parse");
        assert!(changeset.summary.text().is_empty());
    }

    #[test]
    fn delimiter_inside_summary() {
        let content = r#"---
"my-package": patch
---
Summary with --- inside text should not break parsing.
"#;

        let changeset = parse_changeset(content).expect("should parse");
        assert!(changeset.summary.text().contains("---"));
    }

    #[test]
    fn windows_line_endings() {
        let content = "---\r\n\"my-package\": patch\r\n---\r\nWindows style summary.\r\n";

        let changeset = parse_changeset(content).expect("should parse");
        assert_eq!(changeset.releases.len(), 1);
        assert!(changeset.summary.text().contains("Windows style summary"));
    }

    #[test]
    fn none_severity_is_accepted() {
        let content = r#"---
"my-package": none
---
Documentation only.
"#;

        let changeset = parse_changeset(content).expect("should parse");
        assert_eq!(changeset.releases[0].severity, Severity::None);
    }

    #[test]
    fn categorized_summary_parses() {
        let content = r#"---
"my-package": patch
---
fixed: Resolved a crash when the config file is missing.
"#;

        let changeset = parse_categorized_changeset(content).expect("should parse");
        assert_eq!(
            changeset.summary,
            Summary::Categorized {
                category: ChangeCategory::Fixed,
                detail: "Resolved a crash when the config file is missing.".to_string(),
            }
        );
    }

    #[test]
    fn categorized_summary_rejects_unknown_category() {
        let content = r#"---
"my-package": patch
---
broken: Not a valid category.
"#;

        let err = parse_categorized_changeset(content).expect_err("should fail");
        assert!(matches!(err, FormatError::Summary(_)));
    }

    #[test]
    fn categorized_summary_rejects_multiple_keys() {
        let content = r#"---
"my-package": patch
---
fixed: One thing.
added: Another thing.
"#;

        let err = parse_categorized_changeset(content).expect_err("should fail");
        assert!(matches!(
            err,
            FormatError::Summary(SummaryError::ExpectedSingleCategory { found: 2 })
        ));
    }

    #[test]
    fn categorized_summary_rejects_plain_text() {
        let content = r#"---
"my-package": patch
---
Just a plain sentence, no mapping at all
"#;

        let err = parse_categorized_changeset(content).expect_err("should fail");
        assert!(matches!(err, FormatError::Summary(_)));
    }

    #[test]
    fn error_missing_opening_delimiter() {
        let content = r#"
"my-package": patch
---
Some summary.
"#;

        let err = parse_changeset(content).expect_err("should fail");
        assert!(err.to_string().contains("opening delimiter"));
    }

    #[test]
    fn error_missing_closing_delimiter() {
        let content = r#"---
"my-package": patch
Some summary without closing delimiter.
"#;

        let err = parse_changeset(content).expect_err("should fail");
        assert!(err.to_string().contains("closing delimiter"));
    }

    #[test]
    fn error_longer_dash_run_does_not_close_front_matter() {
        let content = r#"---
"my-package": patch
----
Some summary.
"#;

        let err = parse_changeset(content).expect_err("should fail");
        assert!(err.to_string().contains("closing delimiter"));
    }

    #[test]
    fn error_trailing_text_after_dashes_does_not_close_front_matter() {
        let content = r#"---
"my-package": patch
--- end
Some summary.
"#;

        let err = parse_changeset(content).expect_err("should fail");
        assert!(err.to_string().contains("closing delimiter"));
    }

    #[test]
    fn dash_run_in_front_matter_then_exact_delimiter() {
        let content = "---\n\"my-package\": patch # ----\n---\nSummary.\n";

        let changeset = parse_changeset(content).expect("should parse");
        assert_eq!(changeset.releases[0].name, "my-package");
        assert_eq!(changeset.summary, Summary::Plain("Summary.".to_string()));
    }

    #[test]
    fn error_empty_front_matter() {
        let content = r#"---
---
Some summary.
"#;

        let err = parse_changeset(content).expect_err("should fail");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn error_invalid_severity() {
        let content = r#"---
"my-package": gigantic
---
Some summary.
"#;

        let err = parse_changeset(content).expect_err("should fail");
        assert!(err.to_string().contains("YAML"));
    }

    #[test]
    fn error_empty_releases() {
        let content = r#"---
{}
---
Some summary.
"#;

        let err = parse_changeset(content).expect_err("should fail");
        assert!(err.to_string().contains("at least one release"));
    }

    #[test]
    fn error_duplicate_package() {
        let content = r#"---
"my-package": major
"my-package": patch
---
Some summary.
"#;

        let err = parse_changeset(content).expect_err("should fail");
        assert!(
            err.to_string().contains("duplicate"),
            "expected duplicate-key error, got: {err}"
        );
    }

    #[test]
    fn error_input_too_large() {
        let huge_content = "a".repeat(MAX_INPUT_SIZE + 1);

        let err = parse_changeset(&huge_content).expect_err("should fail");
        assert!(err.to_string().contains("maximum size"));
    }
}
