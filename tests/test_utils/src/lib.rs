mod ab_universe;
mod documents;

pub use crate::ab_universe::{ab_parser, ab_tokens, AB_RULES};
pub use crate::documents::{MINIMAL_DOCUMENT, STREAM_DOCUMENT};
