//! Analysis module - answer aggregation

mod summarize;

pub use summarize::{
    frequency_records, mean_rank_records, normalize_document, records_for, word_frequency_records,
    TOP_WORDS,
};
