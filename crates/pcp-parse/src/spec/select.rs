//! Selection of a single sample for highlighting

use anyhow::anyhow;
use pcp_data::{stats, Dataset};

/// Maps a dataset to one sample index
pub trait Select: Send + Sync {
    fn select(&self, dataset: &Dataset) -> anyhow::Result<usize>;
}

impl<F> Select for F
where
    F: Fn(&Dataset) -> anyhow::Result<usize> + Send + Sync,
{
    fn select(&self, dataset: &Dataset) -> anyhow::Result<usize> {
        self(dataset)
    }
}

/// Sample with the largest value of a field, first one on ties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgMax(pub String);

impl Select for ArgMax {
    fn select(&self, dataset: &Dataset) -> anyhow::Result<usize> {
        stats::argmax(dataset.field(&self.0)?)
            .ok_or_else(|| anyhow!("field '{}' has no values to take the maximum of", self.0))
    }
}

/// Sample with the smallest value of a field, first one on ties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgMin(pub String);

impl Select for ArgMin {
    fn select(&self, dataset: &Dataset) -> anyhow::Result<usize> {
        stats::argmin(dataset.field(&self.0)?)
            .ok_or_else(|| anyhow!("field '{}' has no values to take the minimum of", self.0))
    }
}

/// A fixed sample index in the filtered and sorted dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIndex(pub usize);

impl Select for FixedIndex {
    fn select(&self, _dataset: &Dataset) -> anyhow::Result<usize> {
        Ok(self.0)
    }
}
