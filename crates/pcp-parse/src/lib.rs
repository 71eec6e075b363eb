//! Parsing and scaling of datasets into plot-ready parallel-coordinates data
//!
//! The pipeline runs in a fixed order: filter/sort, color axis, highlights,
//! variables. The sample order fixed by filter/sort is shared by every
//! block of the resulting [`ParsedResult`].

pub mod config;
pub mod palette;
pub mod spec;
mod color;
mod highlight;
mod pipeline;
mod variables;

use std::fmt;
use pcp_core::ScaleError;
use pcp_data::DataError;
use thiserror::Error;

// Re-exports
pub use color::{resolve_color, ColorBlock};
pub use config::PlotConfig;
pub use highlight::{resolve_highlights, HighlightBlock};
pub use palette::{ColorMap, ColorTag, Rgb};
pub use pipeline::{parse, ParseConfig, ParsedResult};
pub use spec::{ColorSpec, Extract, HighlightSpec, Select, VariableSpec};
pub use variables::{resolve_variables, AxisTick, VariableBlock};

/// Errors that can occur while parsing a dataset
#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("{kind} '{name}': {source}")]
    Scale {
        kind: SpecKind,
        name: String,
        source: ScaleError,
    },

    #[error("{kind} '{name}': extraction failed: {source}")]
    Extract {
        kind: SpecKind,
        name: String,
        source: anyhow::Error,
    },

    #[error("{kind} '{name}': extracted {actual} values but the dataset has {expected} samples")]
    ExtractLength {
        kind: SpecKind,
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("color '{name}': range needs at least two strictly ascending values, got {values:?}")]
    ColorRange { name: String, values: Vec<f64> },

    #[error("highlight '{name}': selection failed: {source}")]
    Select { name: String, source: anyhow::Error },

    #[error("highlight '{name}': index {index} out of range for {len} samples")]
    HighlightOutOfRange { name: String, index: usize, len: usize },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Kind of spec an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    Variable,
    Color,
}

impl fmt::Display for SpecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecKind::Variable => f.write_str("variable"),
            SpecKind::Color => f.write_str("color"),
        }
    }
}
