use std::fmt::Write;

use changekit_core::{Changeset, Severity};

use crate::planner::ReleasePlan;

/// The commit message recorded when a changeset is added.
#[must_use]
pub fn add_commit_message(changeset: &Changeset) -> String {
    format!("docs(changeset): {}", changeset.summary.text())
}

/// The commit message for a release commit.
///
/// Lists every package actually being published (severity above `none`) with
/// its new version. Committing itself is the caller's job.
#[must_use]
pub fn release_commit_message(plan: &ReleasePlan) -> String {
    let publishable: Vec<_> = plan
        .releases
        .iter()
        .filter(|release| release.severity != Severity::None)
        .collect();

    let mut message = format!("RELEASING: Releasing {} package(s)\n", publishable.len());
    message.push_str("\nReleases:\n");

    for release in publishable {
        let _ = writeln!(message, "  {}@{}", release.name, release.new_version);
    }

    message
}
