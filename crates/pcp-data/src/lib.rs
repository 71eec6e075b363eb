//! Datasets and the filter/sort stage of the parallel-coordinates pipeline

pub mod dataset;
pub mod rules;
pub mod stats;
mod filter_sort;

use std::fmt;
use thiserror::Error;

// Re-exports
pub use dataset::Dataset;
pub use filter_sort::filter_sort;
pub use rules::{FilterRule, SortRule};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("missing field '{field}'")]
    MissingField { field: String },

    #[error("duplicate field '{field}'")]
    DuplicateField { field: String },

    #[error("field '{field}' has {actual} values but the dataset has {expected} samples")]
    FieldLength { field: String, expected: usize, actual: usize },

    #[error("sample index {index} out of range for {len} samples")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("filter mask has {actual} entries but the dataset has {expected} samples")]
    MaskLength { expected: usize, actual: usize },

    #[error("sort permutation has {actual} entries but the filtered dataset has {expected} samples")]
    PermutationLength { expected: usize, actual: usize },

    #[error("sort permutation entry {position} is {index}, out of range for {len} samples")]
    PermutationIndex { position: usize, index: usize, len: usize },

    #[error("sort permutation entry {position} repeats index {index}")]
    PermutationDuplicate { position: usize, index: usize },

    #[error("{stage} rule failed: {source}")]
    Rule { stage: Stage, source: anyhow::Error },

    #[error("column '{field}' has unsupported type {data_type}")]
    UnsupportedColumn { field: String, data_type: String },

    #[error("column '{field}' contains {count} null values")]
    NullValues { field: String, count: usize },

    #[error("column '{field}' holds {value}, which has no exact f64 representation")]
    InexactInteger { field: String, value: i64 },
}

/// Pipeline stage running a caller-supplied rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Filter,
    Sort,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Filter => f.write_str("filter"),
            Stage::Sort => f.write_str("sort"),
        }
    }
}
