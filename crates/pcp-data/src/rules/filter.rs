//! Built-in filter rules

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::FilterRule;
use crate::Dataset;

/// Keep every sample
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl FilterRule for KeepAll {
    fn mask(&self, dataset: &Dataset) -> anyhow::Result<Vec<bool>> {
        Ok(vec![true; dataset.len()])
    }
}

/// Keep samples whose field value lies within `[lo, hi]`
#[derive(Debug, Clone)]
pub struct KeepWithin {
    pub field: String,
    pub lo: f64,
    pub hi: f64,
}

impl KeepWithin {
    pub fn new(field: impl Into<String>, lo: f64, hi: f64) -> Self {
        Self {
            field: field.into(),
            lo,
            hi,
        }
    }
}

impl FilterRule for KeepWithin {
    fn mask(&self, dataset: &Dataset) -> anyhow::Result<Vec<bool>> {
        let values = dataset.field(&self.field)?;
        Ok(values.iter().map(|&v| v >= self.lo && v <= self.hi).collect())
    }
}

/// Keep a random subset of at most `count` samples
///
/// Kept samples retain their original relative order. Without a seed the
/// generator is seeded from system entropy.
#[derive(Debug, Clone, Copy)]
pub struct RandomSubset {
    pub count: usize,
    pub seed: Option<u64>,
}

impl RandomSubset {
    pub fn new(count: usize) -> Self {
        Self { count, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl FilterRule for RandomSubset {
    fn mask(&self, dataset: &Dataset) -> anyhow::Result<Vec<bool>> {
        let len = dataset.len();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut mask = vec![false; len];
        for i in rand::seq::index::sample(&mut rng, len, self.count.min(len)).iter() {
            mask[i] = true;
        }
        Ok(mask)
    }
}
