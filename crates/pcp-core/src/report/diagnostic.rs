//! Diagnostic summaries emitted by the pipeline stages

use std::fmt;

use crate::scale::{Range, ScaleKind};

/// A summary produced while parsing a dataset
///
/// Informational only: nothing in the parsed output depends on these.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    FilterSort(FilterSortSummary),
    Color(ColorSummary),
    Highlight(HighlightSummary),
    Variable(VariableSummary),
}

/// Sample counts through the filter/sort stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSortSummary {
    pub raw: usize,
    pub filtered: usize,
    pub sorted: usize,
}

/// Color axis configuration next to what the data actually spans
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSummary {
    pub name: String,
    pub ticks: Vec<f64>,
    pub scale: ScaleKind,
    pub observed: Option<(f64, f64)>,
}

/// One resolved highlight
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSummary {
    pub name: String,
    pub color: String,
    pub index: usize,
}

/// Per-variable sanity check of the configured range
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSummary {
    pub name: String,
    pub color: String,
    pub range: Range,
    pub scale: ScaleKind,
    pub observed: Option<(f64, f64)>,
    /// Samples outside the declared range
    pub out_of_range: usize,
    /// Raw value of each highlighted sample, by highlight name
    pub highlights: Vec<(String, f64)>,
}

struct Observed(Option<(f64, f64)>);

impl fmt::Display for Observed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some((min, max)) => write!(f, "[{}, {}]", min, max),
            None => f.write_str("none"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FilterSort(s) => write!(
                f,
                "samples: raw = {}, filtered = {}, sorted = {}",
                s.raw, s.filtered, s.sorted
            ),
            Diagnostic::Color(s) => write!(
                f,
                "color {}: ticks = {:?}, scale = {}, observed = {}",
                s.name, s.ticks, s.scale, Observed(s.observed)
            ),
            Diagnostic::Highlight(s) => write!(
                f,
                "highlight {}: color = {}, index = {}",
                s.name, s.color, s.index
            ),
            Diagnostic::Variable(s) => {
                write!(
                    f,
                    "variable {}: color = {}, range = {}, scale = {}, observed = {}, out of range = {}",
                    s.name, s.color, s.range, s.scale, Observed(s.observed), s.out_of_range
                )?;
                for (name, value) in &s.highlights {
                    write!(f, ", {} = {}", name, value)?;
                }
                Ok(())
            }
        }
    }
}
