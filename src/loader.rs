//! Loading thesaurus data into the synonym store.
//!
//! A load resolves a source URI ([`source`]), pulls the data file out of its zip
//! archive ([`archive`]), parses it ([`parser`]) while dropping profane words
//! ([`profanity`]), and writes the result in batches ([`pipeline`]).

pub mod archive;
pub mod encoding;
pub mod parser;
pub mod pipeline;
pub mod profanity;
pub mod source;

pub use encoding::Encoding;
pub use parser::{IngestRecord, ParseStats, ThesaurusEntry, ThesaurusParser};
pub use pipeline::{LoadReport, ingest, load};
pub use profanity::{ProfanityFilter, ProfanityRule};
