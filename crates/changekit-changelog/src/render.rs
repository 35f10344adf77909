use chrono::NaiveDate;
use semver::Version;

use crate::sections::ChangelogSection;

/// Serializes grouped sections into changelog body text.
///
/// Sections appear in insertion (package) order, each as a `###` heading
/// followed by one labelled block per subsection in severity-seen order.
#[must_use]
pub fn render_sections(sections: &[ChangelogSection]) -> String {
    let mut output = String::new();

    for section in sections {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str("### ");
        output.push_str(&section.package);
        output.push('\n');

        for subsection in &section.subsections {
            output.push('\n');
            output.push_str(&subsection.severity.to_string());
            output.push_str(" changes:\n");
            output.push_str(&subsection.entry);
            output.push('\n');
        }
    }

    output
}

/// Splices a rendered release body into an existing changelog document.
///
/// An empty document becomes a fresh changelog whose first heading is the new
/// version. Otherwise the dated version heading and body are inserted
/// immediately after the document's first line break, preserving everything
/// below.
#[must_use]
pub fn splice(existing: &str, new_version: &Version, date: NaiveDate, body: &str) -> String {
    let body = body.trim();

    if existing.trim().is_empty() {
        return format!("## {new_version}\n\n{body}\n");
    }

    let heading = format!("## [{new_version}] {date}");

    match existing.find('\n') {
        Some(pos) => {
            let (first_line, rest) = existing.split_at(pos + 1);
            format!("{first_line}\n{heading}\n\n{body}\n{rest}")
        }
        // Single line without a trailing newline: append below it.
        None => format!("{existing}\n\n{heading}\n\n{body}\n"),
    }
}

#[cfg(test)]
mod tests {
    use changekit_core::Severity;

    use super::*;
    use crate::sections::Subsection;

    fn section(package: &str, subsections: &[(Severity, &str)]) -> ChangelogSection {
        ChangelogSection {
            package: package.to_string(),
            subsections: subsections
                .iter()
                .map(|(severity, entry)| Subsection {
                    severity: *severity,
                    entry: (*entry).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn render_single_section() {
        let sections = vec![section("pkg1", &[(Severity::Minor, "- add X")])];

        let rendered = render_sections(&sections);

        assert_eq!(rendered, "### pkg1\n\nminor changes:\n- add X\n");
    }

    #[test]
    fn render_preserves_section_and_subsection_order() {
        let sections = vec![
            section(
                "pkg1",
                &[(Severity::Patch, "- a fix"), (Severity::Major, "- a break")],
            ),
            section("pkg2", &[(Severity::Minor, "- a feature")]),
        ];

        let rendered = render_sections(&sections);

        let pkg1 = rendered.find("### pkg1").expect("pkg1 heading");
        let patch = rendered.find("patch changes:").expect("patch block");
        let major = rendered.find("major changes:").expect("major block");
        let pkg2 = rendered.find("### pkg2").expect("pkg2 heading");

        assert!(pkg1 < patch && patch < major && major < pkg2);
    }

    #[test]
    fn render_empty_sections_is_empty() {
        assert!(render_sections(&[]).is_empty());
    }

    #[test]
    fn splice_into_empty_document_creates_fresh_changelog() {
        let version = Version::new(1, 1, 0);
        let date = NaiveDate::from_ymd_opt(2026, 8, 27).expect("valid date");

        let result = splice("", &version, date, "### pkg1\n\nminor changes:\n- add X\n");

        assert!(result.starts_with("## 1.1.0\n\n### pkg1"));
    }

    #[test]
    fn splice_inserts_after_first_line_break() {
        let existing = "# Changelog\n\n## [1.0.0] 2026-01-01\n\n### pkg1\n\n- old entry\n";
        let version = Version::new(1, 1, 0);
        let date = NaiveDate::from_ymd_opt(2026, 8, 27).expect("valid date");

        let result = splice(existing, &version, date, "- new entry");

        assert!(result.starts_with("# Changelog\n"));
        let new_pos = result.find("## [1.1.0] 2026-08-27").expect("new heading");
        let old_pos = result.find("## [1.0.0] 2026-01-01").expect("old heading");
        assert!(new_pos < old_pos, "new release goes above the old one");
        assert!(result.contains("- old entry"), "prior content preserved");
    }

    #[test]
    fn splice_heading_uses_iso_date() {
        let version = Version::new(2, 0, 0);
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).expect("valid date");

        let result = splice("# Changelog\n", &version, date, "- entry");

        assert!(result.contains("## [2.0.0] 2026-03-05"));
    }

    #[test]
    fn splice_whitespace_only_document_treated_as_empty() {
        let version = Version::new(0, 1, 0);
        let date = NaiveDate::from_ymd_opt(2026, 8, 27).expect("valid date");

        let result = splice("  \n  ", &version, date, "- entry");

        assert!(result.starts_with("## 0.1.0\n"));
    }
}
