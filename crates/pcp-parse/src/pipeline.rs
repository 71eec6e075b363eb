//! The full parse: dataset and configuration in, plot-ready data out

use std::fmt;
use std::sync::Arc;
use pcp_core::Reporter;
use pcp_data::rules::{Identity, KeepAll};
use pcp_data::{filter_sort, Dataset, FilterRule, SortRule};
use serde::Serialize;
use tracing::debug;

use crate::color::{resolve_color, ColorBlock};
use crate::highlight::{resolve_highlights, HighlightBlock};
use crate::spec::{ColorSpec, HighlightSpec, VariableSpec};
use crate::variables::{resolve_variables, VariableBlock};
use crate::ParseError;

/// Everything a parse needs besides the dataset
#[derive(Clone)]
pub struct ParseConfig {
    pub filter: Arc<dyn FilterRule>,
    pub sort: Arc<dyn SortRule>,
    pub variables: Vec<VariableSpec>,
    pub color: ColorSpec,
    pub highlights: Vec<HighlightSpec>,
}

impl ParseConfig {
    /// Keep every sample in dataset order, no variables or highlights yet
    pub fn new(color: ColorSpec) -> Self {
        Self {
            filter: Arc::new(KeepAll),
            sort: Arc::new(Identity),
            variables: Vec::new(),
            color,
            highlights: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: impl FilterRule + 'static) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    pub fn with_sort(mut self, sort: impl SortRule + 'static) -> Self {
        self.sort = Arc::new(sort);
        self
    }

    pub fn with_variable(mut self, variable: VariableSpec) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn with_highlight(mut self, highlight: HighlightSpec) -> Self {
        self.highlights.push(highlight);
        self
    }
}

impl fmt::Debug for ParseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseConfig")
            .field("variables", &self.variables)
            .field("color", &self.color)
            .field("highlights", &self.highlights)
            .finish_non_exhaustive()
    }
}

/// Normalized, render-ready output of a parse
///
/// All blocks share one sample count and one sample order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedResult {
    pub color: ColorBlock,
    pub highlight: HighlightBlock,
    pub variable: VariableBlock,
}

impl ParsedResult {
    /// Number of plotted samples
    pub fn n_sol(&self) -> usize {
        self.variable.n_sol()
    }
}

/// Run the whole pipeline over `dataset`
pub fn parse(
    dataset: &Dataset,
    config: &ParseConfig,
    reporter: &dyn Reporter,
) -> Result<ParsedResult, ParseError> {
    let data = filter_sort(dataset, config.filter.as_ref(), config.sort.as_ref(), reporter)?;
    debug!(samples = data.len(), variables = config.variables.len(), "parsing");

    let color = resolve_color(&data, &config.color, reporter)?;
    let highlight = resolve_highlights(&data, &config.highlights, reporter)?;
    let variable = resolve_variables(&data, &config.variables, Some(&highlight), reporter)?;

    Ok(ParsedResult {
        color,
        highlight,
        variable,
    })
}
