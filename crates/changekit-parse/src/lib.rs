mod error;
mod parse;
mod serialize;

pub use error::{FormatError, FrontMatterError, SummaryError, ValidationError};
pub use parse::{parse_categorized_changeset, parse_changeset};
pub use serialize::serialize_changeset;
