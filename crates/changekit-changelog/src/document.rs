use chrono::NaiveDate;
use semver::Version;

use crate::render::splice;

/// An in-memory changelog document.
///
/// Version history lives here rather than in package manifests: the most
/// recent `##` heading carries the currently released version.
#[derive(Debug, Clone, Default)]
pub struct ChangelogDocument {
    content: String,
}

impl ChangelogDocument {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The version carried by the most recent `##` heading, if any.
    ///
    /// Accepts both the bracketed dated form (`## [1.2.3] 2026-01-01`) and the
    /// bare form a fresh document starts with (`## 1.2.3`).
    #[must_use]
    pub fn current_version(&self) -> Option<Version> {
        let heading = self
            .content
            .lines()
            .find_map(|line| line.strip_prefix("## "))?;

        let text = match (heading.find('['), heading.find(']')) {
            (Some(open), Some(close)) if open < close => &heading[open + 1..close],
            _ => heading.trim(),
        };

        Version::parse(text).ok()
    }

    /// Splices a rendered release body in as the newest entry.
    pub fn prepend_release(&mut self, new_version: &Version, date: NaiveDate, body: &str) {
        self.content = splice(&self.content, new_version, date, body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_version_from_bracketed_heading() {
        let doc = ChangelogDocument::new(
            "# Changelog\n\n## [1.4.2] 2026-01-10\n\n- entry\n\n## [1.4.1] 2025-12-01\n",
        );

        assert_eq!(doc.current_version(), Some(Version::new(1, 4, 2)));
    }

    #[test]
    fn current_version_from_bare_heading() {
        let doc = ChangelogDocument::new("## 0.1.0\n\n- first release\n");

        assert_eq!(doc.current_version(), Some(Version::new(0, 1, 0)));
    }

    #[test]
    fn current_version_missing_when_no_heading() {
        let doc = ChangelogDocument::new("just some prose\n");
        assert_eq!(doc.current_version(), None);

        let empty = ChangelogDocument::default();
        assert_eq!(empty.current_version(), None);
    }

    #[test]
    fn current_version_missing_when_heading_is_not_semver() {
        let doc = ChangelogDocument::new("## [Unreleased]\n");
        assert_eq!(doc.current_version(), None);
    }

    #[test]
    fn prepend_release_then_read_back() {
        let mut doc = ChangelogDocument::new("# Changelog\n\n## [1.0.0] 2026-01-01\n\n- old\n");
        let date = NaiveDate::from_ymd_opt(2026, 8, 27).expect("valid date");

        doc.prepend_release(&Version::new(1, 1, 0), date, "- new");

        assert_eq!(doc.current_version(), Some(Version::new(1, 1, 0)));
        assert!(doc.content().contains("- old"));
    }
}
