use indexmap::IndexMap;
use indexmap::map::Entry;
use semver::Version;

use changekit_core::{PendingChangeset, Severity};
use changekit_version::{increment, max_severity};

/// Per-package accumulator built while folding changesets.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InternalRelease {
    name: String,
    severity: Severity,
    old_version: Version,
    /// Ids of every changeset that declared a release for this package, in
    /// processing order.
    changeset_ids: Vec<String>,
}

/// A per-package accumulator finalized with the computed new version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComprehensiveRelease {
    pub name: String,
    pub severity: Severity,
    pub old_version: Version,
    pub new_version: Version,
    pub changeset_ids: Vec<String>,
}

/// The aggregate of all pending changesets into one set of version bumps.
///
/// Every release carries the same `new_version`, derived from the maximum
/// severity across all packages. That conflation of independent packages is a
/// known quirk of the format this tool implements; it is preserved on purpose
/// and pinned by tests rather than silently changed.
#[derive(Debug, Clone)]
pub struct ReleasePlan {
    pub new_version: Version,
    pub changesets: Vec<PendingChangeset>,
    pub releases: Vec<ComprehensiveRelease>,
}

/// The pairwise severity reducer applied in changeset order.
///
/// First occurrence sets the accumulator verbatim, including `none`.
/// Afterwards an incoming `major` always replaces, an incoming `minor` or
/// `patch` replaces only an accumulated `patch` or `none`, and an incoming
/// `none` never replaces anything. The fold is order-dependent and not a plain
/// max, so it must be applied pairwise exactly like this.
#[must_use]
pub fn merge_severity(existing: Option<Severity>, incoming: Severity) -> Severity {
    let Some(current) = existing else {
        return incoming;
    };

    let upgrades = incoming == Severity::Major
        || ((current == Severity::Patch || current == Severity::None)
            && (incoming == Severity::Minor || incoming == Severity::Patch));

    if upgrades { incoming } else { current }
}

/// Merges changesets into one release plan.
///
/// Scans changesets strictly in input order: the severity fold is
/// order-dependent and must not be parallelized. An empty input yields an
/// empty plan whose `new_version` equals `old_version`; callers treat that as
/// "nothing to release" upstream.
#[must_use]
pub fn assemble_release_plan(
    changesets: &[PendingChangeset],
    old_version: &Version,
) -> ReleasePlan {
    let mut accumulators: IndexMap<String, InternalRelease> = IndexMap::new();

    for changeset in changesets {
        for release in &changeset.changeset.releases {
            match accumulators.entry(release.name.clone()) {
                Entry::Occupied(mut slot) => {
                    let acc = slot.get_mut();
                    acc.severity = merge_severity(Some(acc.severity), release.severity);
                    acc.changeset_ids.push(changeset.id.clone());
                }
                Entry::Vacant(slot) => {
                    slot.insert(InternalRelease {
                        name: release.name.clone(),
                        severity: merge_severity(None, release.severity),
                        old_version: old_version.clone(),
                        changeset_ids: vec![changeset.id.clone()],
                    });
                }
            }
        }
    }

    let plan_severity = max_severity(accumulators.values().map(|r| r.severity));
    let new_version = increment(old_version, plan_severity);

    let releases = accumulators
        .into_values()
        .map(|r| ComprehensiveRelease {
            name: r.name,
            severity: r.severity,
            old_version: r.old_version,
            new_version: new_version.clone(),
            changeset_ids: r.changeset_ids,
        })
        .collect();

    ReleasePlan {
        new_version,
        changesets: changesets.to_vec(),
        releases,
    }
}
