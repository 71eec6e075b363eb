//! Column statistics used by selectors and diagnostics

use itertools::{Itertools, MinMaxResult};

/// Observed `(min, max)` of a column, `None` when it is empty
///
/// NaN values are ignored.
pub fn observed_extent(values: &[f64]) -> Option<(f64, f64)> {
    match values.iter().filter(|v| !v.is_nan()).minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(&v) => Some((v, v)),
        MinMaxResult::MinMax(&min, &max) => Some((min, max)),
    }
}

/// Index of the largest value, first occurrence on ties
pub fn argmax(values: &[f64]) -> Option<usize> {
    first_extreme(values, |candidate, best| candidate > best)
}

/// Index of the smallest value, first occurrence on ties
pub fn argmin(values: &[f64]) -> Option<usize> {
    first_extreme(values, |candidate, best| candidate < best)
}

fn first_extreme(values: &[f64], better: impl Fn(f64, f64) -> bool) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if !better(v, current) => {}
            _ => best = Some((i, v)),
        }
    }

    best.map(|(i, _)| i)
}
