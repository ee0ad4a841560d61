//! Data module - results decoding and response records

mod document;
mod loader;
mod records;

pub use document::{Question, RawAnswer, SurveyDocument};
pub use loader::{LoaderError, ResultsLoader};
pub use records::{ResponseRecord, SchemaTag, UnknownSchema};
