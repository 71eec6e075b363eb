//! Caller-supplied configuration of the plotted axes and highlights
//!
//! Specs are immutable during a parse. Extraction and selection are
//! capabilities ([`Extract`], [`Select`]) so derived quantities can be
//! plotted without adding fields to the dataset.

mod extract;
mod select;

use std::fmt;
use std::sync::Arc;
use pcp_core::{Range, ScaleKind};

pub use extract::{Extract, Field};
pub(crate) use extract::extract_checked;
pub use select::{ArgMax, ArgMin, FixedIndex, Select};

use crate::palette::ColorTag;

/// One vertical axis of the plot
#[derive(Clone)]
pub struct VariableSpec {
    pub name: String,
    pub extract: Arc<dyn Extract>,
    pub range: Range,
    pub scale: ScaleKind,
    pub color: ColorTag,
}

impl VariableSpec {
    pub fn new(name: impl Into<String>, extract: impl Extract + 'static, range: impl Into<Range>) -> Self {
        Self {
            name: name.into(),
            extract: Arc::new(extract),
            range: range.into(),
            scale: ScaleKind::Linear,
            color: ColorTag::default(),
        }
    }

    /// Axis reading the field of the same name
    pub fn field(name: impl Into<String>, range: impl Into<Range>) -> Self {
        let name = name.into();
        Self::new(name.clone(), Field(name), range)
    }

    pub fn with_scale(mut self, scale: ScaleKind) -> Self {
        self.scale = scale;
        self
    }

    pub fn logarithmic(self) -> Self {
        self.with_scale(ScaleKind::Logarithmic)
    }

    pub fn with_color(mut self, color: impl Into<ColorTag>) -> Self {
        self.color = color.into();
        self
    }
}

impl fmt::Debug for VariableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableSpec")
            .field("name", &self.name)
            .field("range", &self.range)
            .field("scale", &self.scale)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// The color axis
///
/// `ticks` are strictly ascending; the first and last are the color map
/// bounds and every entry becomes a colorbar tick.
#[derive(Clone)]
pub struct ColorSpec {
    pub name: String,
    pub extract: Arc<dyn Extract>,
    pub ticks: Vec<f64>,
    pub scale: ScaleKind,
}

impl ColorSpec {
    pub fn new(name: impl Into<String>, extract: impl Extract + 'static, ticks: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            extract: Arc::new(extract),
            ticks: ticks.into(),
            scale: ScaleKind::Linear,
        }
    }

    /// Color axis reading the field of the same name
    pub fn field(name: impl Into<String>, ticks: impl Into<Vec<f64>>) -> Self {
        let name = name.into();
        Self::new(name.clone(), Field(name), ticks)
    }

    pub fn with_scale(mut self, scale: ScaleKind) -> Self {
        self.scale = scale;
        self
    }
}

impl fmt::Debug for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorSpec")
            .field("name", &self.name)
            .field("ticks", &self.ticks)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

/// A sample drawn distinctly from the rest
#[derive(Clone)]
pub struct HighlightSpec {
    pub name: String,
    pub select: Arc<dyn Select>,
    pub color: ColorTag,
}

impl HighlightSpec {
    pub fn new(name: impl Into<String>, select: impl Select + 'static, color: impl Into<ColorTag>) -> Self {
        Self {
            name: name.into(),
            select: Arc::new(select),
            color: color.into(),
        }
    }

    /// Highlight the sample maximizing `field`
    pub fn max_of(name: impl Into<String>, field: impl Into<String>, color: impl Into<ColorTag>) -> Self {
        Self::new(name, ArgMax(field.into()), color)
    }

    /// Highlight the sample minimizing `field`
    pub fn min_of(name: impl Into<String>, field: impl Into<String>, color: impl Into<ColorTag>) -> Self {
        Self::new(name, ArgMin(field.into()), color)
    }
}

impl fmt::Debug for HighlightSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighlightSpec")
            .field("name", &self.name)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}
