mod changelog_store;
mod changeset_store;
mod commit_resolver;

pub use changelog_store::ChangelogStore;
pub use changeset_store::ChangesetStore;
pub use commit_resolver::CommitResolver;
