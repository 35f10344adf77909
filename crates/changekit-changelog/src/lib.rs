mod attribution;
mod document;
mod error;
mod render;
mod sections;

pub use attribution::{Attribution, AttributionCache, AttributionProvider};
pub use document::ChangelogDocument;
pub use error::ChangelogError;
pub use render::{render_sections, splice};
pub use sections::{ChangelogSection, Subsection, build_sections};

pub type Result<T> = std::result::Result<T, ChangelogError>;
