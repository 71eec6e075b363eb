//! Color axis resolution

use pcp_core::report::{ColorSummary, Diagnostic, Reporter};
use pcp_core::{Range, Scale, ScaleKind};
use pcp_data::{stats, Dataset};
use serde::Serialize;
use tracing::debug;

use crate::palette::{ColorMap, Rgb};
use crate::spec::{extract_checked, ColorSpec};
use crate::{ParseError, SpecKind};

/// Normalized color values and colorbar ticks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBlock {
    pub name: String,
    /// One normalized value per sample, not clamped
    pub values: Vec<f64>,
    /// Normalized tick positions
    pub ticks: Vec<f64>,
    /// Raw tick values as configured
    pub range: Vec<f64>,
    pub scale: ScaleKind,
}

impl ColorBlock {
    /// Color map bounds: first and last configured tick
    pub fn bounds(&self) -> Option<Range> {
        Some(Range::new(*self.range.first()?, *self.range.last()?))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Line colors under `map`
    pub fn rgb(&self, map: ColorMap) -> Vec<Rgb> {
        self.values.iter().map(|&v| map.sample(v)).collect()
    }
}

/// Extract and normalize the color axis of `dataset`
pub fn resolve_color(
    dataset: &Dataset,
    spec: &ColorSpec,
    reporter: &dyn Reporter,
) -> Result<ColorBlock, ParseError> {
    let ascending = spec.ticks.len() >= 2 && spec.ticks.windows(2).all(|w| w[0] < w[1]);
    if !ascending {
        return Err(ParseError::ColorRange {
            name: spec.name.clone(),
            values: spec.ticks.clone(),
        });
    }

    let scale_error = |source| ParseError::Scale {
        kind: SpecKind::Color,
        name: spec.name.clone(),
        source,
    };

    let bounds = Range::new(spec.ticks[0], spec.ticks[spec.ticks.len() - 1]);
    let scale = Scale::new(bounds, spec.scale).map_err(scale_error)?;

    let raw = extract_checked(SpecKind::Color, &spec.name, spec.extract.as_ref(), dataset)?;
    let values = scale.normalize(&raw).map_err(scale_error)?;
    let ticks = scale.normalize(&spec.ticks).map_err(scale_error)?;
    debug!(name = %spec.name, samples = values.len(), "color axis resolved");

    reporter.report(&Diagnostic::Color(ColorSummary {
        name: spec.name.clone(),
        ticks: spec.ticks.clone(),
        scale: spec.scale,
        observed: stats::observed_extent(&raw),
    }));

    Ok(ColorBlock {
        name: spec.name.clone(),
        values,
        ticks,
        range: spec.ticks.clone(),
        scale: spec.scale,
    })
}
