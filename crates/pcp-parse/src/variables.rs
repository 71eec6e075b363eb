//! Variable resolution: the raw and normalized matrices

use ndarray::{Array1, Array2, ArrayView1};
use pcp_core::report::{Diagnostic, Reporter, VariableSummary};
use pcp_core::{Range, Scale, ScaleKind};
use pcp_data::{stats, Dataset};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use tracing::debug;

use crate::highlight::HighlightBlock;
use crate::palette::ColorTag;
use crate::spec::{extract_checked, VariableSpec};
use crate::{ParseError, SpecKind};

/// Plotted axes, rows in spec order and columns in sample order
///
/// Serializes with its `n_var` and `n_sol` counts; the per-axis scales used
/// for ticks are not serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBlock {
    pub names: Vec<String>,
    pub colors: Vec<ColorTag>,
    pub ranges: Vec<Range>,
    pub scales: Vec<ScaleKind>,
    /// `n_var x n_sol` extracted values
    pub raw: Array2<f64>,
    /// `n_var x n_sol` normalized values, not clamped
    pub normalized: Array2<f64>,
    axes: Vec<Scale>,
}

impl Serialize for VariableBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VariableBlock", 8)?;
        state.serialize_field("n_var", &self.n_var())?;
        state.serialize_field("n_sol", &self.n_sol())?;
        state.serialize_field("names", &self.names)?;
        state.serialize_field("colors", &self.colors)?;
        state.serialize_field("ranges", &self.ranges)?;
        state.serialize_field("scales", &self.scales)?;
        state.serialize_field("raw", &self.raw)?;
        state.serialize_field("normalized", &self.normalized)?;
        state.end()
    }
}

/// Axis label position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisTick {
    pub value: f64,
    pub position: f64,
}

impl VariableBlock {
    pub fn n_var(&self) -> usize {
        self.raw.nrows()
    }

    pub fn n_sol(&self) -> usize {
        self.raw.ncols()
    }

    pub fn raw_row(&self, var: usize) -> ArrayView1<'_, f64> {
        self.raw.row(var)
    }

    pub fn normalized_row(&self, var: usize) -> ArrayView1<'_, f64> {
        self.normalized.row(var)
    }

    /// Index of the variable with the given name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Evenly spaced labels for one axis, `None` for an unknown variable
    pub fn axis_ticks(&self, var: usize, count: usize) -> Option<Vec<AxisTick>> {
        let scale = self.axes.get(var)?;
        let ticks = scale
            .ticks(count)
            .into_iter()
            .enumerate()
            .map(|(i, value)| AxisTick {
                value,
                position: i as f64 / (count.max(2) - 1) as f64,
            })
            .collect();
        Some(ticks)
    }
}

/// Extract and normalize every variable, in spec order
///
/// `highlights`, when given, adds the highlighted raw values to the
/// diagnostics.
pub fn resolve_variables(
    dataset: &Dataset,
    specs: &[VariableSpec],
    highlights: Option<&HighlightBlock>,
    reporter: &dyn Reporter,
) -> Result<VariableBlock, ParseError> {
    let n_sol = dataset.len();
    let mut block = VariableBlock {
        names: Vec::with_capacity(specs.len()),
        colors: Vec::with_capacity(specs.len()),
        ranges: Vec::with_capacity(specs.len()),
        scales: Vec::with_capacity(specs.len()),
        raw: Array2::zeros((specs.len(), n_sol)),
        normalized: Array2::zeros((specs.len(), n_sol)),
        axes: Vec::with_capacity(specs.len()),
    };

    for (row, spec) in specs.iter().enumerate() {
        let scale_error = |source| ParseError::Scale {
            kind: SpecKind::Variable,
            name: spec.name.clone(),
            source,
        };

        let scale = Scale::new(spec.range, spec.scale).map_err(scale_error)?;
        let raw = extract_checked(SpecKind::Variable, &spec.name, spec.extract.as_ref(), dataset)?;
        let normalized = scale.normalize(&raw).map_err(scale_error)?;
        debug!(name = %spec.name, row, "variable resolved");

        reporter.report(&Diagnostic::Variable(summarize(spec, &raw, highlights)));

        block.raw.row_mut(row).assign(&Array1::from(raw));
        block.normalized.row_mut(row).assign(&Array1::from(normalized));
        block.names.push(spec.name.clone());
        block.colors.push(spec.color.clone());
        block.ranges.push(spec.range);
        block.scales.push(spec.scale);
        block.axes.push(scale);
    }

    Ok(block)
}

fn summarize(spec: &VariableSpec, raw: &[f64], highlights: Option<&HighlightBlock>) -> VariableSummary {
    let highlights = highlights
        .map(|block| {
            block
                .iter()
                .filter_map(|(name, index, _)| raw.get(index).map(|&v| (name.to_string(), v)))
                .collect()
        })
        .unwrap_or_default();

    VariableSummary {
        name: spec.name.clone(),
        color: spec.color.to_string(),
        range: spec.range,
        scale: spec.scale,
        observed: stats::observed_extent(raw),
        out_of_range: raw.iter().filter(|&&v| !spec.range.contains(v)).count(),
        highlights,
    }
}
