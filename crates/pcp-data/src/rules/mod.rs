//! Caller-supplied filter and sort rules
//!
//! Rules are capabilities: anything implementing [`FilterRule`] or
//! [`SortRule`] can drive the filter/sort stage, including plain closures.
//! Errors raised by a rule are propagated unchanged by the stage.

mod filter;
mod sort;

pub use filter::{KeepAll, KeepWithin, RandomSubset};
pub use sort::{Identity, Reverse, Shuffle, SortByField};

use crate::Dataset;

/// Produces an inclusion mask with one entry per sample
pub trait FilterRule: Send + Sync {
    fn mask(&self, dataset: &Dataset) -> anyhow::Result<Vec<bool>>;
}

/// Produces a permutation of `0..dataset.len()`
pub trait SortRule: Send + Sync {
    fn permutation(&self, dataset: &Dataset) -> anyhow::Result<Vec<usize>>;
}

impl<F> FilterRule for F
where
    F: Fn(&Dataset) -> anyhow::Result<Vec<bool>> + Send + Sync,
{
    fn mask(&self, dataset: &Dataset) -> anyhow::Result<Vec<bool>> {
        self(dataset)
    }
}

impl<F> SortRule for F
where
    F: Fn(&Dataset) -> anyhow::Result<Vec<usize>> + Send + Sync,
{
    fn permutation(&self, dataset: &Dataset) -> anyhow::Result<Vec<usize>> {
        self(dataset)
    }
}
