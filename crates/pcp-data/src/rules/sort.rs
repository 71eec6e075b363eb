//! Built-in sort rules

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::SortRule;
use crate::Dataset;

/// Keep the current order
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl SortRule for Identity {
    fn permutation(&self, dataset: &Dataset) -> anyhow::Result<Vec<usize>> {
        Ok((0..dataset.len()).collect())
    }
}

/// Reverse the current order
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverse;

impl SortRule for Reverse {
    fn permutation(&self, dataset: &Dataset) -> anyhow::Result<Vec<usize>> {
        Ok((0..dataset.len()).rev().collect())
    }
}

/// Stable sort by the values of one field
///
/// Highlighted or interesting samples are usually sorted last so they are
/// drawn on top.
#[derive(Debug, Clone)]
pub struct SortByField {
    pub field: String,
    pub descending: bool,
}

impl SortByField {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

impl SortRule for SortByField {
    fn permutation(&self, dataset: &Dataset) -> anyhow::Result<Vec<usize>> {
        let values = dataset.field(&self.field)?;
        let mut permutation: Vec<usize> = (0..values.len()).collect();

        if self.descending {
            permutation.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
        } else {
            permutation.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        }
        Ok(permutation)
    }
}

/// Random order
#[derive(Debug, Clone, Copy, Default)]
pub struct Shuffle {
    pub seed: Option<u64>,
}

impl Shuffle {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl SortRule for Shuffle {
    fn permutation(&self, dataset: &Dataset) -> anyhow::Result<Vec<usize>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut permutation: Vec<usize> = (0..dataset.len()).collect();
        permutation.shuffle(&mut rng);
        Ok(permutation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_fields([("x", vec![3.0, 1.0, 4.0, 1.0, 5.0])]).unwrap()
    }

    #[test]
    fn test_identity_and_reverse() {
        assert_eq!(Identity.permutation(&dataset()).unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(Reverse.permutation(&dataset()).unwrap(), vec![4, 3, 2, 1, 0]);
        assert!(Reverse.permutation(&Dataset::new(0)).unwrap().is_empty());
    }

    #[test]
    fn test_sort_by_field_is_stable() {
        let ascending = SortByField::ascending("x").permutation(&dataset()).unwrap();
        assert_eq!(ascending, vec![1, 3, 0, 2, 4]);

        let descending = SortByField::descending("x").permutation(&dataset()).unwrap();
        assert_eq!(descending, vec![4, 2, 0, 1, 3]);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut permutation = Shuffle::seeded(42).permutation(&dataset()).unwrap();
        assert_eq!(Shuffle::seeded(42).permutation(&dataset()).unwrap(), permutation);

        permutation.sort_unstable();
        assert_eq!(permutation, vec![0, 1, 2, 3, 4]);
    }
}
