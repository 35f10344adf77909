mod changelog_io;
mod changeset_io;
mod git;

pub use changelog_io::FileSystemChangelogStore;
pub use changeset_io::FileSystemChangesetStore;
pub use git::Git2CommitResolver;
