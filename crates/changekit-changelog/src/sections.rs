use indexmap::IndexMap;

use changekit_core::{PendingChangeset, Severity};

use crate::attribution::{Attribution, AttributionCache};
use crate::error::ChangelogError;

/// Merged entries for one severity within a package section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsection {
    pub severity: Severity,
    pub entry: String,
}

/// All changelog content for one package, grouped by severity.
///
/// Subsection order is the order severities were first encountered while
/// scanning changesets; there is never more than one subsection per severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogSection {
    pub package: String,
    pub subsections: Vec<Subsection>,
}

/// Groups changeset summaries into per-package, per-severity sections.
///
/// Each changeset contributes one rendered entry line, filed under every
/// package/severity pair it declares. Lines landing in an existing subsection
/// are appended newline-joined instead of creating a duplicate.
///
/// When an [`AttributionCache`] is supplied, every changeset commit is
/// resolved in one batch up front and the entry lines carry the
/// `#<num> Thanks @<handle>!` suffix.
///
/// # Errors
///
/// Propagates attribution failures; grouping itself cannot fail.
pub fn build_sections(
    changesets: &[PendingChangeset],
    mut attribution: Option<&mut AttributionCache<'_>>,
) -> Result<Vec<ChangelogSection>, ChangelogError> {
    if let Some(cache) = attribution.as_deref_mut() {
        let commits: Vec<&str> = changesets
            .iter()
            .filter_map(|cs| cs.commit.as_deref())
            .collect();
        cache.prime(&commits)?;
    }

    let mut grouped: IndexMap<String, IndexMap<Severity, String>> = IndexMap::new();

    for changeset in changesets {
        let looked_up = match (attribution.as_deref_mut(), changeset.commit.as_deref()) {
            (Some(cache), Some(commit)) => Some(cache.get(commit)?.clone()),
            _ => None,
        };
        let line = release_line(changeset, looked_up.as_ref());

        for release in &changeset.changeset.releases {
            let subsections = grouped.entry(release.name.clone()).or_default();
            match subsections.entry(release.severity) {
                indexmap::map::Entry::Occupied(mut existing) => {
                    let merged = existing.get_mut();
                    merged.push('\n');
                    merged.push_str(&line);
                }
                indexmap::map::Entry::Vacant(slot) => {
                    slot.insert(line.clone());
                }
            }
        }
    }

    Ok(grouped
        .into_iter()
        .map(|(package, subsections)| ChangelogSection {
            package,
            subsections: subsections
                .into_iter()
                .map(|(severity, entry)| Subsection { severity, entry })
                .collect(),
        })
        .collect())
}

/// One bulleted entry line: first summary line after `- `, later lines
/// indented, attribution suffix appended when available.
fn release_line(changeset: &PendingChangeset, attribution: Option<&Attribution>) -> String {
    let text = changeset.changeset.summary.text();
    let mut lines = text.lines().map(str::trim_end);

    let mut entry = format!("- {}", lines.next().unwrap_or_default());
    for line in lines {
        entry.push_str("\n  ");
        entry.push_str(line);
    }

    if let Some(attribution) = attribution {
        let mut suffix = String::new();
        if let Some(number) = attribution.pr_number {
            suffix.push_str(&format!("#{number}"));
        }
        if let Some(handle) = &attribution.author {
            if !suffix.is_empty() {
                suffix.push(' ');
            }
            suffix.push_str(&format!("Thanks @{handle}!"));
        }
        if !suffix.is_empty() {
            entry.push(' ');
            entry.push_str(&suffix);
        }
    }

    entry
}
