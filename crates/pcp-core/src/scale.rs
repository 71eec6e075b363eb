//! Scaling engine mapping raw values onto the [0, 1] axis coordinate
//!
//! Every plotted axis (variables and the color axis alike) goes through the
//! same [`Scale`], so data lines, colorbar ticks and axis labels share one
//! coordinate system. Bounds come from configuration, never from the data,
//! and results are not clamped: values outside the declared range land
//! outside [0, 1].

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Errors raised while building a scale or normalizing values against it
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    #[error("degenerate range [{value}, {value}]: lower and upper bound are equal")]
    DegenerateRange { value: f64 },

    #[error("inverted range [{lo}, {hi}]: lower bound is above upper bound")]
    InvertedRange { lo: f64, hi: f64 },

    #[error("range bound {value} is not finite")]
    NonFiniteBound { value: f64 },

    #[error("range bound {value} is not positive, a logarithmic scale needs lo > 0")]
    NonPositiveBound { value: f64 },

    /// The bounds differ but their transformed span is zero or overflows
    #[error("range [{lo}, {hi}] has no usable {kind} span")]
    UnusableSpan { lo: f64, hi: f64, kind: ScaleKind },

    // `index` is the position in the filtered, sorted data, not the raw row.
    #[error("value {value}{} is not finite", at_sample(.index))]
    NonFiniteValue { index: Option<usize>, value: f64 },

    #[error("value {value}{} is not positive, a logarithmic scale needs values > 0", at_sample(.index))]
    NonPositiveValue { index: Option<usize>, value: f64 },

    #[error("value {value}{} overflows the normalized axis", at_sample(.index))]
    Overflow { index: Option<usize>, value: f64 },
}

fn at_sample(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at sample {} (after filter and sort)", i),
        None => String::new(),
    }
}

/// Scale type of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    #[default]
    Linear,
    #[serde(alias = "log")]
    Logarithmic,
}

impl ScaleKind {
    /// Map a raw value into the space where the axis is linear
    pub fn transform(self, value: f64) -> f64 {
        match self {
            ScaleKind::Linear => value,
            ScaleKind::Logarithmic => value.log10(),
        }
    }

    /// Inverse of [`ScaleKind::transform`]
    pub fn inverse(self, value: f64) -> f64 {
        match self {
            ScaleKind::Linear => value,
            ScaleKind::Logarithmic => 10f64.powf(value),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleKind::Linear => "linear",
            ScaleKind::Logarithmic => "logarithmic",
        }
    }
}

impl std::fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared `[lo, hi]` bounds of an axis
///
/// Serialized as a two-element array. Construction does not validate;
/// validation happens when a [`Scale`] is built from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Range {
    pub lo: f64,
    pub hi: f64,
}

impl Range {
    pub const UNIT: Range = Range { lo: 0.0, hi: 1.0 };

    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Check if a value lies within the bounds (inclusive)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }
}

impl From<[f64; 2]> for Range {
    fn from([lo, hi]: [f64; 2]) -> Self {
        Self { lo, hi }
    }
}

impl From<Range> for [f64; 2] {
    fn from(range: Range) -> Self {
        [range.lo, range.hi]
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// A validated range together with its scale kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    range: Range,
    kind: ScaleKind,
    /// Transformed lower bound
    lo_t: f64,
    /// Transformed span, finite and positive
    span_t: f64,
}

impl Scale {
    /// Build a scale, rejecting bounds the normalization formula cannot use
    pub fn new(range: Range, kind: ScaleKind) -> Result<Self, ScaleError> {
        for value in [range.lo, range.hi] {
            if !value.is_finite() {
                return Err(ScaleError::NonFiniteBound { value });
            }
        }

        if range.lo > range.hi {
            return Err(ScaleError::InvertedRange { lo: range.lo, hi: range.hi });
        }
        if range.lo == range.hi {
            return Err(ScaleError::DegenerateRange { value: range.lo });
        }

        if kind == ScaleKind::Logarithmic && range.lo <= 0.0 {
            return Err(ScaleError::NonPositiveBound { value: range.lo });
        }

        let lo_t = kind.transform(range.lo);
        let span_t = kind.transform(range.hi) - lo_t;
        if !(span_t.is_finite() && span_t > 0.0) {
            return Err(ScaleError::UnusableSpan { lo: range.lo, hi: range.hi, kind });
        }

        Ok(Self {
            range,
            kind,
            lo_t,
            span_t,
        })
    }

    pub fn linear(lo: f64, hi: f64) -> Result<Self, ScaleError> {
        Self::new(Range::new(lo, hi), ScaleKind::Linear)
    }

    pub fn logarithmic(lo: f64, hi: f64) -> Result<Self, ScaleError> {
        Self::new(Range::new(lo, hi), ScaleKind::Logarithmic)
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// Normalize a single value
    pub fn normalize_value(&self, value: f64) -> Result<f64, ScaleError> {
        self.normalize_at(None, value)
    }

    /// Normalize a sequence, reporting the index of the first offending value
    pub fn normalize(&self, values: &[f64]) -> Result<Vec<f64>, ScaleError> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| self.normalize_at(Some(i), value))
            .collect()
    }

    fn normalize_at(&self, index: Option<usize>, value: f64) -> Result<f64, ScaleError> {
        if !value.is_finite() {
            return Err(ScaleError::NonFiniteValue { index, value });
        }
        if self.kind == ScaleKind::Logarithmic && value <= 0.0 {
            return Err(ScaleError::NonPositiveValue { index, value });
        }

        let normalized = (self.kind.transform(value) - self.lo_t) / self.span_t;
        if !normalized.is_finite() {
            return Err(ScaleError::Overflow { index, value });
        }
        Ok(normalized)
    }

    /// Map a normalized coordinate back to a raw value
    pub fn denormalize(&self, normalized: f64) -> f64 {
        self.kind.inverse(normalized * self.span_t + self.lo_t)
    }

    /// Raw tick values evenly spaced along the axis
    ///
    /// Spacing is uniform in transformed space, so a logarithmic axis gets
    /// geometric ticks. Fewer than two ticks yields the two bounds.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let count = count.max(2);
        (0..count)
            .map(|i| {
                let t = i as f64 / (count - 1) as f64;
                match i {
                    0 => self.range.lo,
                    _ if i == count - 1 => self.range.hi,
                    _ => self.denormalize(t),
                }
            })
            .collect()
    }
}

/// Normalize `values` against `range` under `kind`
///
/// `normalized[i] = (f(values[i]) - f(lo)) / (f(hi) - f(lo))` with `f` the
/// identity for linear scales and `log10` for logarithmic ones.
pub fn normalize(values: &[f64], range: Range, kind: ScaleKind) -> Result<Vec<f64>, ScaleError> {
    Scale::new(range, kind)?.normalize(values)
}
